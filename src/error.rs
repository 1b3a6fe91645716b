/// Error types for ez-cmd
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for ez-cmd operations
#[derive(Error, Debug)]
pub enum EzError {
    /// A mutator was pointed at a command name that does not exist
    #[error("Command not found: {0}")]
    NotFound(String),

    /// An alias removal named an alias that is not bound to the command
    #[error("Alias '{alias}' is not bound to command '{command}'")]
    AliasNotFound { command: String, alias: String },

    /// A new name or alias collides with an existing name or alias
    #[error("Name conflict: '{0}' is already a command name or alias")]
    NameConflict(String),

    /// Built-in subcommand words cannot be used as names or aliases
    #[error("'{0}' is a reserved command name")]
    ReservedName(String),

    /// The first token of a bare invocation matched nothing
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A template referenced a placeholder with no matching argument
    #[error("Missing argument for placeholder {{{index}}}: got {provided} argument(s)")]
    MissingArgument { index: usize, provided: usize },

    /// Popping the last remaining step would destroy the command
    #[error("Command '{0}' has only one step left")]
    EmptySequence(String),

    /// A sequence step exited non-zero; `step` is 1-based
    #[error("Step {step} exited with status {status}")]
    StepFailed { step: usize, status: i32 },

    /// Malformed CLI invocation
    #[error("{0}")]
    InvalidArguments(String),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for ez-cmd operations
pub type Result<T> = std::result::Result<T, EzError>;

/// Convert EzError to a user-friendly error message
impl EzError {
    pub fn user_message(&self) -> String {
        match self {
            EzError::NotFound(name) => {
                format!("Command '{}' not found.", name)
            }
            EzError::AliasNotFound { command, alias } => {
                format!("Alias '{}' not found for command '{}'.", alias, command)
            }
            EzError::NameConflict(token) => {
                format!("'{}' is already in use as a command name or alias.", token)
            }
            EzError::ReservedName(token) => {
                format!("'{}' is a reserved command name.", token)
            }
            EzError::UnknownCommand(token) => {
                format!("Unknown command: '{}'.", token)
            }
            EzError::MissingArgument { index, provided } => {
                format!(
                    "Not enough arguments: the command references {{{}}} but only {} argument(s) were given.",
                    index, provided
                )
            }
            EzError::EmptySequence(name) => {
                format!(
                    "Cannot remove the last step of '{}'. Delete the command instead.",
                    name
                )
            }
            EzError::StepFailed { step, status } => {
                format!("Step {} failed with exit status {}.", step, status)
            }
            EzError::InvalidArguments(msg) => msg.clone(),
            EzError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            EzError::Serialization(e) => {
                format!("Config file is not valid JSON: {}", e)
            }
            EzError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }
}
