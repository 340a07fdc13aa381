use crate::configuration::{Category, NotifierConfig};
use crate::error::{NotifyError, TransportError};
use crate::traits::{DeliveryLog, HttpsConnector, OutboundRequest};
use arc_swap::ArcSwap;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Every accepted webhook starts with this prefix
pub const WEBHOOK_PREFIX: &str = "https://chat.googleapis.com/v1/spaces/";

/// Immutable view of the adapter configuration. An empty `webhook_url`
/// means unconfigured; a non-empty one always carries `WEBHOOK_PREFIX`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub template: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlCheck {
    Unset,
    Invalid,
    Valid,
}

pub fn verify_url_format(url: &str) -> UrlCheck {
    if url.is_empty() {
        UrlCheck::Unset
    } else if url.starts_with(WEBHOOK_PREFIX) {
        UrlCheck::Valid
    } else {
        UrlCheck::Invalid
    }
}

/// Pull the `reason` member out of a trigger reason document, if any
pub fn extract_reason(trigger_reason: &str) -> Option<String> {
    let doc: Value = serde_json::from_str(trigger_reason).ok()?;
    match doc.get("reason")? {
        Value::String(reason) => Some(reason.clone()),
        other => Some(other.to_string()),
    }
}

/// Build the JSON body posted to the webhook
pub fn render_payload(
    settings: &Settings,
    notification_name: &str,
    trigger_reason: &str,
    message: &str,
) -> String {
    let mut text = format!("*{}*\n\n{}\n", notification_name, message);
    if let Some(reason) = extract_reason(trigger_reason) {
        text.push_str(&format!("Notification has {}\n\n", reason));
    }
    text.push_str(&settings.template);
    text.push_str("\n\n");

    serde_json::json!({ "text": text }).to_string()
}

/// Derive the `host` or `host:port` connection target from a URL
pub fn connection_target(url: &str) -> Result<String, TransportError> {
    let (_scheme, rest) = url
        .split_once(':')
        .ok_or_else(|| TransportError::InvalidUrl(url.to_string()))?;
    let authority = rest
        .strip_prefix("//")
        .ok_or_else(|| TransportError::InvalidUrl(url.to_string()))?;

    let path_at = authority.find('/');
    let host_end = path_at.unwrap_or(authority.len());
    let host_and_port = &authority[..host_end];

    // A ':' after the first '/' belongs to the path or query, not the port
    let target = match host_and_port.split_once(':') {
        None => host_and_port.to_string(),
        Some((host, port)) => format!("{}:{}", host, port),
    };
    Ok(target)
}

/// Leading-digit check on the decimal status, so any code written "2.." passes
pub fn is_success_status(status: u16) -> bool {
    status.to_string().starts_with('2')
}

fn settings_from(config: &NotifierConfig, log: &dyn DeliveryLog) -> Settings {
    let mut webhook_url = config.webhook.clone();
    match verify_url_format(&webhook_url) {
        UrlCheck::Valid => {}
        UrlCheck::Unset => log.error("Hangouts webhook is not set."),
        UrlCheck::Invalid => {
            webhook_url.clear();
            log.error("Hangouts webhook URL is not valid.");
        }
    }

    Settings {
        webhook_url,
        template: config.text.clone(),
    }
}

/// Delivers notifications to a Google Chat webhook
pub struct HangoutsNotifier {
    settings: ArcSwap<Settings>,
    connector: Arc<dyn HttpsConnector>,
    log: Arc<dyn DeliveryLog>,
}

impl HangoutsNotifier {
    pub fn new(
        config: &NotifierConfig,
        connector: Arc<dyn HttpsConnector>,
        log: Arc<dyn DeliveryLog>,
    ) -> Self {
        let settings = settings_from(config, log.as_ref());
        Self {
            settings: ArcSwap::from_pointee(settings),
            connector,
            log,
        }
    }

    /// Current configuration snapshot
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.load_full()
    }

    /// Replace the webhook and template from a serialized category
    pub fn reconfigure(&self, new_config: &str) {
        let config = match Category::parse("new", new_config) {
            Ok(category) => NotifierConfig::from_category_lenient(&category),
            Err(e) => {
                self.log
                    .error(&format!("Failed to parse Hangouts configuration: {}", e));
                NotifierConfig::default()
            }
        };

        let settings = settings_from(&config, self.log.as_ref());
        self.settings.store(Arc::new(settings));
    }

    /// Send one notification, reporting the outcome as a typed result
    pub async fn deliver(
        &self,
        notification_name: &str,
        trigger_reason: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let settings = self.settings.load_full();
        if settings.webhook_url.is_empty() {
            return Err(NotifyError::NotConfigured);
        }

        let url = settings.webhook_url.clone();
        let request = OutboundRequest {
            method: "POST".to_string(),
            url: url.clone(),
            headers: vec![("Content-type".to_string(), "application/json".to_string())],
            body: render_payload(&settings, notification_name, trigger_reason, message),
        };

        let transport_failure = |source: TransportError| NotifyError::Transport {
            url: url.clone(),
            source,
        };
        let target = connection_target(&url).map_err(transport_failure)?;
        let connection = self.connector.connect(&target).map_err(transport_failure)?;
        let status = connection
            .send(&request)
            .await
            .map_err(transport_failure)?;

        if !is_success_status(status) {
            return Err(NotifyError::Rejected { url, status });
        }

        info!("Notification {} delivered to {}", notification_name, target);
        Ok(())
    }

    /// Send one notification; failures are logged and reported as `false`
    #[tracing::instrument(
        name = "notify",
        skip(self, trigger_reason, message),
        fields(delivery_id = %Uuid::new_v4())
    )]
    pub async fn notify(&self, notification_name: &str, trigger_reason: &str, message: &str) -> bool {
        match self.deliver(notification_name, trigger_reason, message).await {
            Ok(()) => true,
            Err(NotifyError::NotConfigured) => {
                self.log.error("Hangouts webhook URL is not valid.");
                false
            }
            Err(e) => {
                self.log.error(&e.to_string());
                false
            }
        }
    }
}
