//! Error types for the flashcard core.

use thiserror::Error;

/// Result type alias for core operations
pub type LeitnerResult<T> = Result<T, LeitnerError>;

/// Main error type for deck storage and decoding operations
#[derive(Error, Debug)]
pub enum LeitnerError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("deck not found: {0}")]
    NotFound(String),

    #[error("remote request failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("stale write rejected for '{0}': version token no longer matches the remote content")]
    StaleWrite(String),

    #[error("failed to decode deck content: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),
}

impl LeitnerError {
    /// Create a remote error from a status code and message
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        LeitnerError::Remote {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = LeitnerError::remote(500, "Internal Server Error");
        assert_eq!(
            err.to_string(),
            "remote request failed with status 500: Internal Server Error"
        );

        let err = LeitnerError::NotFound("french.csv".to_string());
        assert!(err.to_string().contains("french.csv"));
    }

    #[test]
    fn test_stale_write_names_the_deck() {
        let err = LeitnerError::StaleWrite("flashcards.csv".to_string());
        assert!(err.to_string().contains("flashcards.csv"));
        assert!(err.to_string().contains("version token"));
    }
}
