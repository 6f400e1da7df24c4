//! This module uses the embedded Diesel migration data to provide functions for checking the
//! database migration status and migrating the database schema to the current state.
//!
//! Each of the two web applications has its own set of migrations for its own database. The
//! functions provided are meant to be used directly from the command line interface
//! implementation.
use crate::cli_error::CliError;
use crate::setup::get_database_url_from_env;
use crate::Service;
use diesel::migration::Migration;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

const FYYUR_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/fyyur");
const TRIVIA_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/trivia");

fn migrations_for(service: Service) -> EmbeddedMigrations {
    match service {
        Service::Fyyur => FYYUR_MIGRATIONS,
        Service::Trivia => TRIVIA_MIGRATIONS,
    }
}

/// Migrate the database schema to the latest known migration of the given application.
///
/// The database connection URL is taken from the environment variables, using
/// [get_database_url_from_env]. Information about the migration process is printed to stdout.
pub fn run_migrations(service: Service) -> Result<(), CliError> {
    let database_url = get_database_url_from_env(service)?;
    let mut connection = diesel::pg::PgConnection::establish(&database_url)?;
    let mut connection =
        diesel_migrations::HarnessWithOutput::new(&mut connection, std::io::stdout());
    let applied = connection
        .run_pending_migrations(migrations_for(service))
        .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))?;
    info!(
        "Applied {} migrations to the {} database.",
        applied.len(),
        service
    );

    Ok(())
}

/// Check if the database schema has been migrated to the latest known migration of the given
/// application. If not, return an error, listing the missing migrations.
///
/// The database connection URL is taken from the environment variables, using
/// [get_database_url_from_env].
pub fn check_migration_state(service: Service) -> Result<(), CliError> {
    let database_url = get_database_url_from_env(service)?;
    let mut connection = diesel::pg::PgConnection::establish(&database_url)?;
    let pending_migrations = connection
        .pending_migrations(migrations_for(service))
        .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))?;
    if !pending_migrations.is_empty() {
        return Err(CliError::DatabaseMigrationRequired {
            service,
            missing_migrations: pending_migrations
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        });
    }
    Ok(())
}
