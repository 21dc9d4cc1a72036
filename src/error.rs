//! Error types for the board client

use crate::permissions::Permission;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("permission denied: {0}")]
    PermissionDenied(Permission),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: u64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Status code of a server-side rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
