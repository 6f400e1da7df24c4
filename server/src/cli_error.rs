use crate::data_store::StoreError;
use crate::setup::SetupError;
use crate::Service;
use diesel::ConnectionError;

#[derive(Debug)]
pub enum CliError {
    /// The application setup (environment variables) are not complete or invalid
    SetupError(String),
    /// Could not connect to the database server
    CouldNotConnectToDatabase(String),
    /// Somehow, the database connection or our data_store abstraction failed during startup or cli
    /// data transactions
    UnexpectedStoreError(String),
    /// Binding the web server to the requested port failed
    BindError(std::io::Error),
    /// Starting the web server failed with an io error
    ServerError(std::io::Error),
    /// Somehow, migrating the database to the current schema version failed
    DatabaseMigrationError(String),
    /// Cannot start because one or more database schema migrations of the application are pending
    DatabaseMigrationRequired {
        service: Service,
        /// The names of the pending database schema migrations
        missing_migrations: Vec<String>,
    },
    /// The seed data file for `load-data` could not be opened or read
    FileError(String),
    /// The seed data is malformed or references venues, artists or categories which are not part
    /// of the file, or the database rejected one of its records
    DataError(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SetupError { .. } => 1,
            CliError::CouldNotConnectToDatabase(_) => 4,
            CliError::DatabaseMigrationRequired { .. } => 5,
            CliError::DataError(_) => 1,
            CliError::FileError(_) => 1,
            CliError::DatabaseMigrationError(_) => 4,
            CliError::UnexpectedStoreError(_) => 2,
            CliError::BindError(_) => 3,
            CliError::ServerError(_) => 3,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::SetupError(e) => {
                write!(f, "Setup invalid: {}", e)
            }
            CliError::CouldNotConnectToDatabase(e) => {
                write!(f, "Could not connect to database: {}", e)
            }
            CliError::DatabaseMigrationRequired {
                service,
                missing_migrations,
            } => {
                write!(
                    f,
                    "The {} database is not up to date. Run `migrate-database {}` first. \
                    Missing migrations: {}",
                    service,
                    service,
                    missing_migrations.join(", ")
                )
            }
            CliError::DataError(e) => {
                write!(f, "Invalid seed data: {}", e)
            }
            CliError::FileError(e) => f.write_str(e),
            CliError::DatabaseMigrationError(e) => {
                write!(f, "Error while applying database migrations: {}", e)
            }
            CliError::UnexpectedStoreError(e) => {
                write!(f, "Unexpected error in data store: {}", e)
            }
            CliError::BindError(e) => {
                write!(f, "Could not bind web server socket to TCP port: {}", e)
            }
            CliError::ServerError(e) => write!(f, "Could not initialize web server: {}", e),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(e) => Self::CouldNotConnectToDatabase(e),
            StoreError::QueryError(e) => Self::UnexpectedStoreError(e.to_string()),
            StoreError::TransactionConflict => {
                Self::UnexpectedStoreError("Concurrent transaction conflict".to_string())
            }
            StoreError::NotExisting => Self::DataError("Item not existing".to_string()),
            StoreError::ConflictEntityExists => {
                Self::DataError("Conflicting entity exists".to_string())
            }
            StoreError::InvalidInputData(e) => Self::DataError(e),
            StoreError::InvalidDataInDatabase(e) => Self::UnexpectedStoreError(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        if value.is_io() {
            Self::FileError(format!("Could not read seed data file: {}", value))
        } else {
            Self::DataError(format!("Not a valid seed data document: {}", value))
        }
    }
}

impl From<SetupError> for CliError {
    fn from(value: SetupError) -> Self {
        Self::SetupError(value.to_string())
    }
}

impl From<ConnectionError> for CliError {
    fn from(value: ConnectionError) -> Self {
        Self::CouldNotConnectToDatabase(value.to_string())
    }
}
