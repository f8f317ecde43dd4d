use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomatchError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("Invalid filter: {0}")]
    Filter(String),
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, AutomatchError>;

// Helper conversions
impl From<rusqlite::Error> for AutomatchError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<std::io::Error> for AutomatchError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<config::ConfigError> for AutomatchError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for AutomatchError {
    fn from(e: serde_json::Error) -> Self { Self::Filter(e.to_string()) }
}
