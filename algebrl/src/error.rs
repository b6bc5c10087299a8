//! Errors of the command line front-end.
use thiserror::Error;

/// Failures of the external collaborators: the chat endpoint and the OCR command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("environment variable {0} is not set")]
    MissingApiKey(&'static str),

    #[error("chat endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("chat response has no message content")]
    EmptyResponse,

    #[error("`{command}` failed with {status}: {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("no text found in {0}")]
    NoText(String),
}
