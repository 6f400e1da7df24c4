//! Implementations of the command line subcommands, apart from `serve`.

pub mod database_migration;
pub mod file_io;
pub mod print_summary;
