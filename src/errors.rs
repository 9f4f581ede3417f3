/*!
 * Error types for the kslint application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file or its values
    #[error("Config error: {0}")]
    Config(String),

    /// Error in an input the linter cannot interpret
    #[error("Input error: {0}")]
    Input(String),
}
