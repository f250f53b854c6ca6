//! Sensorboard Egress
//!
//! Client for the backend HTTP API that owns every sensor, income, expense
//! and report record. All calls carry HTTP Basic credentials from the
//! configured [`RemoteConfig`].

pub mod client;
pub mod remote;

pub use client::HttpClientConfig;
pub use remote::{RemoteClient, RemoteConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API error ({status_code}): {message}")]
    Remote { status_code: u16, message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid record identifier: '{0}'")]
    InvalidId(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EgressError {
    /// HTTP status code reported by the remote API, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EgressError::Remote { status_code, .. } => Some(*status_code),
            EgressError::Unauthorized => Some(401),
            EgressError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EgressError>;
