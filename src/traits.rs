use crate::error::TransportError;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// A single HTTP request as handed to the HTTPS client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Trait for opening connections to a `host` or `host:port` target
#[cfg_attr(test, automock)]
pub trait HttpsConnector: Send + Sync {
    /// Open a connection handle; dropping the handle releases it
    fn connect(&self, target: &str) -> Result<Box<dyn HttpsConnection>, TransportError>;
}

/// Trait for an open connection able to exchange one request
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpsConnection: Send + Sync {
    /// Send the request and return the numeric HTTP status code
    async fn send(&self, request: &OutboundRequest) -> Result<u16, TransportError>;
}

/// Trait for the error log the adapter reports failures to
#[cfg_attr(test, automock)]
pub trait DeliveryLog: Send + Sync {
    fn error(&self, message: &str);
}

/// DeliveryLog backed by the global tracing subscriber
#[derive(Clone, Debug)]
pub struct TracingLog;

impl TracingLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryLog for TracingLog {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
