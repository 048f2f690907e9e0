// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharpApiError {
    /// Missing or invalid settings, raised before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller arguments rejected before anything is sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned error status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),

    /// The remote job finished but reported failure
    #[error("Job {job_id} failed: {result}")]
    JobFailed {
        job_id: String,
        result: serde_json::Value,
    },

    /// Local wait budget exhausted while the job was still pending
    #[error("Job at {status_url} still pending after {waited_secs}s")]
    PollingTimeout { status_url: String, waited_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SharpApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SharpApiError::PollingTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, SharpApiError>;
