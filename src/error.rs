//! Error types for gridkde.

use thiserror::Error;

/// Main error type for density estimation.
#[derive(Error, Debug)]
pub enum GridKdeError {
    /// A caller supplied a value that violates a precondition
    /// (malformed range, non-positive bandwidth, negative weight, ...).
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A grid cell identifier that the indexer cannot decode.
    #[error("Invalid grid cell: {0}")]
    InvalidCell(String),

    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridKdeError {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        GridKdeError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<geohash::GeohashError> for GridKdeError {
    fn from(e: geohash::GeohashError) -> Self {
        GridKdeError::InvalidGeohash(e.to_string())
    }
}

impl From<serde_json::Error> for GridKdeError {
    fn from(e: serde_json::Error) -> Self {
        GridKdeError::Serialization(e.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for GridKdeError {
    fn from(e: toml::de::Error) -> Self {
        GridKdeError::Serialization(e.to_string())
    }
}

/// Result type alias for gridkde operations.
pub type Result<T> = std::result::Result<T, GridKdeError>;
