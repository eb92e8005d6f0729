use thiserror::Error;

/// Error types for calls against the DNS records API
#[derive(Error, Debug)]
pub enum DnsApiError {
    /// No token was configured for the request
    #[error("Not authenticated, run `form login` or pass --token")]
    NotAuthenticated,

    /// The API answered with a non-success status
    #[error("{message} ({code}, status {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Error during HTTP communication
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Error reading local input such as a zone file
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Error decoding or encoding a payload
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The record described on the command line is not valid
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl DnsApiError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            DnsApiError::Api { status, .. } => Some(*status),
            DnsApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            DnsApiError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
