use std::fmt;
use std::io;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use crate::database::errors::DynamoDbError;

/// Status codes reported back to callers of the callable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallableStatus {
    InvalidArgument,
    Internal,
}

impl CallableStatus {
    pub fn code(&self) -> &'static str {
        match self {
            CallableStatus::InvalidArgument => "invalid-argument",
            CallableStatus::Internal => "internal",
        }
    }

    /// Upper-case form used in HTTP error bodies.
    pub fn canonical(&self) -> &'static str {
        match self {
            CallableStatus::InvalidArgument => "INVALID_ARGUMENT",
            CallableStatus::Internal => "INTERNAL",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            CallableStatus::InvalidArgument => StatusCode::BAD_REQUEST,
            CallableStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for CallableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: type, title, body")]
    MissingCoreFields,

    #[error("Missing required fields for message: toUserId, chatId, messageId")]
    MissingMessageFields,

    #[error("Missing required fields for call: deviceToken, call")]
    MissingCallFields,

    #[error("Unsupported notification type: {0}")]
    UnsupportedType(String),

    #[error("Malformed request: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("User directory lookup failed: {0}")]
    Directory(#[from] DynamoDbError),

    #[error("{0}")]
    Internal(String),
}

impl NotificationError {
    pub fn status(&self) -> CallableStatus {
        match self {
            NotificationError::Validation(_) => CallableStatus::InvalidArgument,
            _ => CallableStatus::Internal,
        }
    }
}

/// Failure reported by a messaging transport for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct TransportError {
    pub code: String,
    pub message: String,
}

impl TransportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("Unable to read service account key: {0}")]
    KeyFile(#[from] io::Error),

    #[error("Invalid service account JSON: {0}")]
    KeyFormat(#[from] SerdeJsonError),

    #[error("JWT signing failed: {0}")]
    JwtSigning(#[from] jsonwebtoken::errors::Error),

    #[error("Request failed: {0}")]
    Http(#[from] ReqwestError),

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),
}

#[derive(Debug, Error)]
pub enum CipherConfigError {
    #[error("Cipher {0} is not valid base64: {1}")]
    Encoding(&'static str, base64::DecodeError),

    #[error("Cipher {name} must be {expected} bytes, got {actual}")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum DecryptionError {
    #[error("Invalid key or IV length")]
    KeyLength,

    #[error("Padding check failed")]
    Unpad,

    #[error("Plaintext is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_error_status() {
        assert_eq!(
            NotificationError::from(ValidationError::MissingCallFields).status(),
            CallableStatus::InvalidArgument
        );
        assert_eq!(
            NotificationError::from(DynamoDbError::DynamoDbOperation("throttled".into())).status(),
            CallableStatus::Internal
        );
        assert_eq!(
            NotificationError::Internal("Invalid dispatch transition".into()).status(),
            CallableStatus::Internal
        );
    }
}
