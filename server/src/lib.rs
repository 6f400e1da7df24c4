pub mod cli;
pub mod cli_error;
mod data_store;
mod setup;
pub mod web;

/// The two web applications contained in this server binary.
///
/// Each server process serves exactly one of them, backed by its own database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Service {
    /// The Fyyur venue/artist/show listing site (HTML)
    Fyyur,
    /// The Trivia question API (JSON)
    Trivia,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Fyyur => f.write_str("fyyur"),
            Service::Trivia => f.write_str("trivia"),
        }
    }
}
