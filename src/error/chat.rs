//! Errors surfaced by the chat client and session.
//!
//! Decoder parse failures never appear here: an unparsable payload is a
//! deferred line, not an error.

use thiserror::Error;

use crate::traits::HttpError;

/// Message shown when no chat backend is configured.
pub const UNAVAILABLE_MESSAGE: &str =
    "Chat service is currently unavailable. Please configure a backend service.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    /// No endpoint configured; the chat backend is disabled.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,

    /// Upstream answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The request could not be sent.
    #[error("Request failed: {0}")]
    Request(HttpError),

    /// Reading the response body failed mid-stream.
    #[error("Stream read failed: {0}")]
    StreamRead(HttpError),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => ChatError::ServerError { status, message },
            other => ChatError::Request(other),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Encode(err.to_string())
    }
}

impl ChatError {
    /// Check if this error is likely transient and the user may resend.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::ServerError { status, .. } => *status >= 500 || *status == 429,
            ChatError::Request(err) | ChatError::StreamRead(err) => matches!(
                err,
                HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
            ),
            ChatError::Unavailable | ChatError::Encode(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
            ChatError::ServerError { status: 429, .. } => {
                "The assistant is busy right now. Please try again in a moment.".to_string()
            }
            ChatError::ServerError { status, .. } if *status >= 500 => {
                "The assistant service is having trouble. Please try again later.".to_string()
            }
            ChatError::ServerError { status, .. } => {
                format!("The assistant rejected the request ({}).", status)
            }
            ChatError::Request(HttpError::Timeout(_))
            | ChatError::StreamRead(HttpError::Timeout(_)) => {
                "The assistant took too long to respond.".to_string()
            }
            ChatError::Request(_) => "Could not reach the assistant service.".to_string(),
            ChatError::StreamRead(_) => "The connection dropped while receiving the reply.".to_string(),
            ChatError::Encode(_) => "Failed to send message".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Unavailable => "E_CHAT_UNAVAILABLE",
            ChatError::ServerError { .. } => "E_CHAT_STATUS",
            ChatError::Request(_) => "E_CHAT_REQUEST",
            ChatError::StreamRead(_) => "E_CHAT_STREAM",
            ChatError::Encode(_) => "E_CHAT_ENCODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        assert_eq!(ChatError::Unavailable.to_string(), UNAVAILABLE_MESSAGE);
        assert_eq!(ChatError::Unavailable.user_message(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_from_http_server_error() {
        let err: ChatError = HttpError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ChatError::ServerError {
                status: 502,
                message: "bad gateway".to_string()
            }
        );
        assert_eq!(err.to_string(), "Server error (502): bad gateway");
    }

    #[test]
    fn test_from_http_connection_error() {
        let err: ChatError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, ChatError::Request(_)));
        assert_eq!(err.error_code(), "E_CHAT_REQUEST");
    }

    #[test]
    fn test_retryable() {
        assert!(ChatError::ServerError {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(ChatError::ServerError {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!ChatError::ServerError {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(ChatError::StreamRead(HttpError::Io("reset".to_string())).is_retryable());
        assert!(!ChatError::Unavailable.is_retryable());
    }

    #[test]
    fn test_user_messages_are_not_empty() {
        let errors = vec![
            ChatError::Unavailable,
            ChatError::ServerError {
                status: 401,
                message: String::new(),
            },
            ChatError::Request(HttpError::Timeout("30s".to_string())),
            ChatError::StreamRead(HttpError::Io("reset".to_string())),
            ChatError::Encode("bad".to_string()),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
            assert!(err.error_code().starts_with("E_CHAT_"));
        }
    }
}
