//! Error types for the delivery adapter.

/// Errors raised while reading a configuration category.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration category: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration category must be a JSON object")]
    NotAnObject,

    #[error("missing configuration item: {0}")]
    MissingKey(String),

    #[error("configuration item {0} has no value or default")]
    NoValue(String),
}

/// Failures at the boundary with the HTTPS client.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("malformed webhook URL: {0}")]
    InvalidUrl(String),

    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to create HTTPS client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Reasons a single delivery did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook URL is not valid")]
    NotConfigured,

    #[error("exception while sending notification to webhook {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to send notification to webhook {url}, status {status}")]
    Rejected { url: String, status: u16 },
}
