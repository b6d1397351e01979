use thiserror::Error;

/// Shown when a failed submit carries no usable message.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong while submitting the form.";

/// Failure reported by a record collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request failed with status code {status}: {message}")]
    Server { status: u16, message: String },

    /// The response could not be understood
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl CollaboratorError {
    /// Message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            CollaboratorError::Server { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            CollaboratorError::Server { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            CollaboratorError::Transport(message) | CollaboratorError::Decode(message)
                if !message.trim().is_empty() =>
            {
                self.to_string()
            }
            _ => GENERIC_SUBMIT_ERROR.to_string(),
        }
    }
}

/// A workflow trigger that was refused before doing any work.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("A request is already in flight")]
    Busy,

    #[error("The information must be acknowledged before submitting")]
    NotAcknowledged,
}
