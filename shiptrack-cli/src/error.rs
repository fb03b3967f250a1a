//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use shiptrack::config::ConfigFileError;
use shiptrack::refresh::ListingError;
use shiptrack::tracking::LookupError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Tracking lookup client could not be created
    Lookup(LookupError),
    /// Listing backend client could not be created
    Listing(ListingError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Input file is not a JSON list of shipment records
    InvalidRecords {
        path: String,
        error: serde_json::Error,
    },
    /// Failed to serialize output
    Output(serde_json::Error),
    /// Failed to listen for the shutdown signal
    Signal(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in config.ini, or regenerate the file with:");
                eprintln!("  shiptrack config init --force");
            }
            CliError::InvalidRecords { .. } => {
                eprintln!();
                eprintln!("Expected a JSON array of records such as:");
                eprintln!(
                    r#"  [{{"id": "1", "tracking_code": "QA123BR", "status": "IN_TRANSIT", "origin": {{"city": "Recife", "state": "PE"}}, "destination": {{"state": "SP"}}}}]"#
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Lookup(e) => write!(f, "Failed to create tracking client: {}", e),
            CliError::Listing(e) => write!(f, "Failed to create backend client: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::InvalidRecords { path, error } => {
                write!(f, "Invalid shipment records in '{}': {}", path, error)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
            CliError::Signal(e) => write!(f, "Failed to listen for Ctrl+C: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Lookup(e) => Some(e),
            CliError::Listing(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::InvalidRecords { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            CliError::Signal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LookupError> for CliError {
    fn from(e: LookupError) -> Self {
        CliError::Lookup(e)
    }
}

impl From<ListingError> for CliError {
    fn from(e: ListingError) -> Self {
        CliError::Listing(e)
    }
}
