/// Shared test fixtures and utilities for test modules
#[allow(dead_code)]
pub mod fixtures {
    use async_trait::async_trait;
    use hangouts_notify::error::TransportError;
    use hangouts_notify::traits::{
        DeliveryLog, HttpsConnection, HttpsConnector, OutboundRequest,
    };
    use hangouts_notify::transport::ReqwestConnector;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const WEBHOOK_HOST: &str = "https://chat.googleapis.com";
    pub const WEBHOOK_PATH: &str = "/v1/spaces/AAAA/messages";

    /// A valid webhook URL carrying key and token query parameters
    pub fn webhook_url() -> String {
        format!("{}{}?key=abc&token=def", WEBHOOK_HOST, WEBHOOK_PATH)
    }

    /// Creates a configuration category in the stored format
    pub fn category_json(webhook: &str, text: &str) -> String {
        serde_json::json!({
            "plugin": { "type": "string", "default": "Hangouts" },
            "webhook": { "type": "string", "default": "", "value": webhook },
            "text": { "type": "string", "default": "", "value": text },
        })
        .to_string()
    }

    /// Log that keeps every error message
    #[derive(Default)]
    pub struct RecordingLog {
        pub messages: Mutex<Vec<String>>,
    }

    impl RecordingLog {
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl DeliveryLog for RecordingLog {
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// Connector that sends the real request to `base` instead of the webhook host
    pub struct RedirectConnector {
        base: String,
        inner: ReqwestConnector,
        pub targets: Mutex<Vec<String>>,
        pub released: Arc<AtomicUsize>,
    }

    impl RedirectConnector {
        pub fn new(base: &str) -> Self {
            Self {
                base: base.to_string(),
                inner: ReqwestConnector::new(),
                targets: Mutex::new(Vec::new()),
                released: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn opened(&self) -> usize {
            self.targets.lock().unwrap().len()
        }

        pub fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    impl HttpsConnector for RedirectConnector {
        fn connect(&self, target: &str) -> Result<Box<dyn HttpsConnection>, TransportError> {
            self.targets.lock().unwrap().push(target.to_string());
            Ok(Box::new(RedirectConnection {
                base: self.base.clone(),
                inner: self.inner.connect(target)?,
                released: self.released.clone(),
            }))
        }
    }

    struct RedirectConnection {
        base: String,
        inner: Box<dyn HttpsConnection>,
        released: Arc<AtomicUsize>,
    }

    impl Drop for RedirectConnection {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl HttpsConnection for RedirectConnection {
        async fn send(&self, request: &OutboundRequest) -> Result<u16, TransportError> {
            let mut redirected = request.clone();
            redirected.url = request.url.replacen(WEBHOOK_HOST, &self.base, 1);
            self.inner.send(&redirected).await
        }
    }
}
