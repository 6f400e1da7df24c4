use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use fyyur_trivia_server::cli_error::CliError;
use fyyur_trivia_server::Service;
use log::{error, warn};
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    let result = run_command(args.command);
    if let Err(e) = result {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve { service } => {
            fyyur_trivia_server::cli::database_migration::check_migration_state(service)?;
            fyyur_trivia_server::web::serve(service)
        }
        Command::MigrateDatabase { service } => {
            fyyur_trivia_server::cli::database_migration::run_migrations(service)
        }
        Command::LoadData { service, path } => {
            fyyur_trivia_server::cli::file_io::load_data_from_file(service, &path)
        }
        Command::PrintSummary { service } => {
            fyyur_trivia_server::cli::print_summary::print_summary(service)
        }
    }
}

/// Server for the Fyyur listing site and the Trivia API
#[derive(Debug, Parser)]
#[clap(name = "fyyur-trivia", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve one of the web applications
    Serve {
        #[clap(value_enum)]
        service: Service,
    },
    /// Apply all pending database schema migrations of a web application
    MigrateDatabase {
        #[clap(value_enum)]
        service: Service,
    },
    /// Load seed data from a JSON file
    LoadData {
        #[clap(value_enum)]
        service: Service,
        /// The path of the JSON file to read from
        path: PathBuf,
    },
    /// Print a table of the stored venues or questions
    PrintSummary {
        #[clap(value_enum)]
        service: Service,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
