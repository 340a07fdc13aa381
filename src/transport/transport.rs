use crate::error::TransportError;
use crate::traits::{HttpsConnection, HttpsConnector, OutboundRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::debug;

/// reqwest-based implementation of HttpsConnector
#[derive(Clone, Debug)]
pub struct ReqwestConnector;

impl ReqwestConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReqwestConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpsConnector for ReqwestConnector {
    fn connect(&self, target: &str) -> Result<Box<dyn HttpsConnection>, TransportError> {
        if target.is_empty() {
            return Err(TransportError::InvalidUrl("empty host".to_string()));
        }

        debug!("Opening HTTPS connection to {}", target);
        // The status of the POST itself decides the outcome, so redirects are not followed
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(TransportError::Client)?;

        Ok(Box::new(ReqwestConnection {
            client,
            target: target.to_string(),
        }))
    }
}

/// A connection handle owning its own client; dropped after one delivery
#[derive(Debug)]
pub struct ReqwestConnection {
    client: Client,
    target: String,
}

impl Drop for ReqwestConnection {
    fn drop(&mut self) {
        debug!("Releasing HTTPS connection to {}", self.target);
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl HttpsConnection for ReqwestConnection {
    #[tracing::instrument(name = "send", skip(self, request), fields(target = %self.target, method = %request.method))]
    async fn send(&self, request: &OutboundRequest) -> Result<u16, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;
        let headers = header_map(&request.headers)?;

        let response = self
            .client
            .request(method, &request.url)
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status().as_u16();
        debug!("Webhook responded with {}", status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_connect_rejects_empty_target() {
        let result = ReqwestConnector::new().connect("");

        assert_matches!(result.err(), Some(TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_header_map_rejects_bad_name() {
        let headers = vec![("bad header".to_string(), "x".to_string())];

        assert_matches!(
            header_map(&headers),
            Err(TransportError::InvalidHeader { name, .. }) if name == "bad header"
        );
    }

    #[test]
    fn test_header_map_keeps_content_type() {
        let headers = vec![("Content-type".to_string(), "application/json".to_string())];
        let map = header_map(&headers).unwrap();

        assert_eq!(map.get("content-type").unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_send_rejects_bad_method() {
        let connection = ReqwestConnector::new().connect("localhost").unwrap();
        let request = OutboundRequest {
            method: "PO ST".to_string(),
            url: "http://localhost/".to_string(),
            headers: vec![],
            body: String::new(),
        };

        assert_matches!(
            connection.send(&request).await,
            Err(TransportError::InvalidMethod(m)) if m == "PO ST"
        );
    }
}
