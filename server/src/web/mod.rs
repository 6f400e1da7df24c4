use crate::cli_error::CliError;
use crate::data_store::get_store_from_env;
use crate::setup::{get_listen_address_from_env, get_listen_port_from_env};
use crate::Service;
use actix_web::middleware::from_fn;
use actix_web::{middleware, web, App, HttpServer};
use http_error_logging::error_logging_middleware;
use log::info;
use std::sync::Arc;

mod fyyur;
mod http_error_logging;
mod trivia;

/// Run the web server for the given application until it is stopped.
///
/// The server binds to the address and port from the environment variables, and uses the database
/// configured for the given application.
pub fn serve(service: Service) -> Result<(), CliError> {
    let store = Arc::new(get_store_from_env(service)?);
    let address = (get_listen_address_from_env()?, get_listen_port_from_env()?);
    info!(
        "Starting {} web server on {}:{} ...",
        service, address.0, address.1
    );

    let server = match service {
        Service::Fyyur => {
            let state = fyyur::FyyurState { store };
            HttpServer::new(move || {
                App::new()
                    .configure(fyyur::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind(address)
            .map_err(CliError::BindError)?
            .run()
        }
        Service::Trivia => {
            let state = trivia::TriviaState { store };
            HttpServer::new(move || {
                App::new()
                    .configure(trivia::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind(address)
            .map_err(CliError::BindError)?
            .run()
        }
    };
    actix_web::rt::System::new()
        .block_on(server)
        .map_err(CliError::ServerError)
}
