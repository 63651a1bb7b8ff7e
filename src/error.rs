//! Error handling for the postgen hook.
//! Defines custom error types and results used throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for postgen operations.
///
/// Only [`Error::TemplateNotFound`] is treated as recoverable by the binary;
/// everything else aborts the hook.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors raised while walking a source directory
    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// No candidate location contained a `hooks/source` directory
    #[error(
        "Could not find template directory with hooks/source (tried: {}).",
        format_tried(.tried)
    )]
    TemplateNotFound { tried: Vec<PathBuf> },

    /// The payload written by the host to stdin could not be parsed
    #[error("Hook input error: {0}.")]
    HookInputError(String),
}

fn format_tried(tried: &[PathBuf]) -> String {
    if tried.is_empty() {
        return "no candidates".to_string();
    }
    tried.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Convenience type alias for Results with postgen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
