//! Error types for loading, selection and narrative requests

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to open data file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found in {path:?}")]
    MissingColumn { path: PathBuf, column: String },
}

/// The requested country name matches no row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Country not found: {name}")]
pub struct CountryNotFound {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Failed to read secrets file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse secrets file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Secret '{0}' is not configured")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The API answered with a non-200 status.
    #[error("Request failed with status code: {status}")]
    Rejected { status: u16, body: String },

    #[error("Narrative request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Credential(#[from] SecretError),
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NarrativeError::Timeout
        } else {
            NarrativeError::Transport(err.to_string())
        }
    }
}
