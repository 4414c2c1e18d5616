//! エラー型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("failed to build request: {0}")]
    Request(String),

    #[error("fetch failed: {0}")]
    Network(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("server reported an error: {0}")]
    Server(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("window is not available")]
    NoWindow,

    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    #[error("completion contained no text")]
    EmptyCompletion,

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl AppError {
    pub fn validation(field: &str, reason: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = AppError::Status { status: 404, message: "Player not found".into() };
        assert_eq!(err.to_string(), "server returned 404: Player not found");
    }

    #[test]
    fn test_validation_message() {
        let err = AppError::validation("games", "must be a whole number");
        assert_eq!(err.to_string(), "invalid games: must be a whole number");
    }

    #[test]
    fn test_server_message() {
        let err = AppError::Server("rate limited".into());
        assert_eq!(err.to_string(), "server reported an error: rate limited");
    }
}
