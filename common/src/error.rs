use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`crate::service::ContactsService`].
#[derive(Debug, Error)]
pub enum ContactsError {
    /// The service rejected the credentials. Always fatal.
    #[error("authentication rejected by the contacts service: {0}")]
    Authentication(String),
    /// Network or service-side failure.
    #[error("contacts service request failed: {0}")]
    Transport(String),
    /// The service answered with something we could not decode.
    #[error("malformed response from the contacts service: {0}")]
    Malformed(String),
}

impl ContactsError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, ContactsError::Authentication(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("mobile_threshold must be between 5 and 10, got {0}")]
    InvalidThreshold(u8),
    #[error("no access token configured (set `access_token` or {0})")]
    MissingToken(&'static str),
}
