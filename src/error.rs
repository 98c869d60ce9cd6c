//! Error types for the sports dashboard data layer

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Error, Debug)]
pub enum DashError {
    /// No response was received (connect failure, timeout, reset).
    #[error("Network request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The client or the request could not be built (TLS backend, bad URL).
    #[error("HTTP request setup failed: {0}")]
    RequestSetup(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected response shape: {message}")]
    UnexpectedShape { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Invalid value '{value}' for {var}")]
    InvalidConfig { var: String, value: String },
}

impl DashError {
    pub fn validation(message: impl Into<String>) -> Self {
        DashError::Validation {
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        DashError::UnexpectedShape {
            message: message.into(),
        }
    }

    /// Coarse classification used by [`ErrorInfo`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashError::Network(_) => ErrorKind::Network,
            DashError::Http { .. } => ErrorKind::Http,
            DashError::Parse(_) | DashError::UnexpectedShape { .. } => ErrorKind::Parse,
            DashError::RequestSetup(_)
            | DashError::Validation { .. }
            | DashError::InvalidDate { .. }
            | DashError::InvalidConfig { .. } => ErrorKind::Validation,
        }
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return DashError::RequestSetup(err);
        }
        match err.status() {
            Some(status) => DashError::Http {
                status: status.as_u16(),
                body: String::new(),
            },
            None => DashError::Network(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Http,
    Parse,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Network => "network",
            ErrorKind::Http => "http",
            ErrorKind::Parse => "parse",
            ErrorKind::Validation => "validation",
        };
        write!(f, "{}", s)
    }
}

/// Cloneable snapshot of a [`DashError`], stored in polling and pagination
/// state so consumers can inspect the last failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    /// Only set for `ErrorKind::Http`.
    pub status: Option<u16>,
    pub message: String,
}

impl From<&DashError> for ErrorInfo {
    fn from(err: &DashError) -> Self {
        let status = match err {
            DashError::Http { status, .. } => Some(*status),
            _ => None,
        };
        ErrorInfo {
            kind: err.kind(),
            status,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}
