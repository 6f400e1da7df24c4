//! Server configuration from environment variables (possibly loaded from a `.env` file)
//!
//! Both applications are configured through the same set of variables. As each of them is backed
//! by its own database, the database URL can be given per application with `FYYUR_DATABASE_URL` or
//! `TRIVIA_DATABASE_URL`. These take precedence over the shared `DATABASE_URL`, so that a single
//! `.env` file can hold the configuration of both applications.

use crate::Service;
use std::env;
use std::env::VarError;
use std::fmt::{Display, Formatter};

const SHARED_DATABASE_URL_VARIABLE: &str = "DATABASE_URL";
const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
const DEFAULT_LISTEN_PORT: u16 = 5000;

/// Get the database URL of the given application from the environment variables.
pub fn get_database_url_from_env(service: Service) -> Result<String, SetupError> {
    database_url(service, |name: &str| env::var(name))
}

/// Get the web server TCP listening port from the environment variable. Defaults to 5000.
pub fn get_listen_port_from_env() -> Result<u16, SetupError> {
    listen_port(|name: &str| env::var(name))
}

/// Get the web server TCP listening interface address from the environment variable. Defaults to
/// the loopback interface.
pub fn get_listen_address_from_env() -> Result<String, SetupError> {
    Ok(optional_variable(&|name: &str| env::var(name), "LISTEN_ADDRESS")?
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_owned()))
}

fn database_url_variable(service: Service) -> &'static str {
    match service {
        Service::Fyyur => "FYYUR_DATABASE_URL",
        Service::Trivia => "TRIVIA_DATABASE_URL",
    }
}

fn database_url(
    service: Service,
    lookup: impl Fn(&str) -> Result<String, VarError>,
) -> Result<String, SetupError> {
    let service_variable = database_url_variable(service);
    if let Some(url) = optional_variable(&lookup, service_variable)? {
        return Ok(url);
    }
    optional_variable(&lookup, SHARED_DATABASE_URL_VARIABLE)?
        .ok_or(SetupError::DatabaseUrlMissing { service_variable })
}

fn listen_port(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<u16, SetupError> {
    match optional_variable(&lookup, "LISTEN_PORT")? {
        None => Ok(DEFAULT_LISTEN_PORT),
        Some(v) => v.trim().parse().map_err(|_| SetupError::EnvVariableInvalid {
            variable_name: "LISTEN_PORT",
            problem: "Not a valid TCP port number",
        }),
    }
}

/// Read a variable, which may be missing. Empty values are treated like missing ones.
fn optional_variable(
    lookup: &impl Fn(&str) -> Result<String, VarError>,
    variable_name: &'static str,
) -> Result<Option<String>, SetupError> {
    match lookup(variable_name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SetupError::EnvVariableInvalid {
            variable_name,
            problem: "no valid unicode",
        }),
    }
}

#[derive(Debug)]
pub enum SetupError {
    /// Neither the application's own database URL variable nor the shared one is defined
    DatabaseUrlMissing {
        service_variable: &'static str,
    },
    EnvVariableInvalid {
        variable_name: &'static str,
        problem: &'static str,
    },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::DatabaseUrlMissing { service_variable } => write!(
                f,
                "Environment variable {} or {} must be defined",
                service_variable, SHARED_DATABASE_URL_VARIABLE
            ),
            SetupError::EnvVariableInvalid {
                variable_name,
                problem,
            } => write!(
                f,
                "Value of environment variable {} is invalid: {}",
                variable_name, problem
            ),
        }
    }
}

impl std::error::Error for SetupError {}
