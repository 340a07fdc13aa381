//! Entry points a notification service uses to drive the adapter.
//!
//! The host loads the plugin, reads [`plugin_info`], hands the stored
//! configuration category to [`plugin_init`] and then calls
//! [`plugin_deliver`] for every notification that fires.

use crate::configuration::{Category, NotifierConfig, default_category};
use crate::notifications::HangoutsNotifier;
use crate::traits::{DeliveryLog, HttpsConnector, TracingLog};
use crate::transport::ReqwestConnector;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub const PLUGIN_NAME: &str = "Hangouts";
pub const PLUGIN_TYPE: &str = "notificationDelivery";
pub const PLUGIN_INTERFACE: &str = "1.0.0";

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PluginInformation {
    pub name: String,
    pub version: String,
    pub options: u32,
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub interface: String,
    pub config: String,
}

pub fn plugin_info() -> PluginInformation {
    PluginInformation {
        name: PLUGIN_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        options: 0,
        plugin_type: PLUGIN_TYPE.to_string(),
        interface: PLUGIN_INTERFACE.to_string(),
        config: default_category().to_string(),
    }
}

/// Opaque handle returned to the host
pub type PluginHandle = Box<HangoutsNotifier>;

/// Initialise with the default reqwest transport and tracing log
pub fn plugin_init(config: &str) -> PluginHandle {
    plugin_init_with(config, Arc::new(ReqwestConnector::new()), Arc::new(TracingLog::new()))
}

pub fn plugin_init_with(
    config: &str,
    connector: Arc<dyn HttpsConnector>,
    log: Arc<dyn DeliveryLog>,
) -> PluginHandle {
    let notifier_config = match Category::parse(PLUGIN_NAME, config) {
        Ok(category) => NotifierConfig::from_category_lenient(&category),
        Err(e) => {
            log.error(&format!("Failed to parse Hangouts configuration: {}", e));
            NotifierConfig::default()
        }
    };

    info!("Initialising {} notification delivery plugin", PLUGIN_NAME);
    Box::new(HangoutsNotifier::new(&notifier_config, connector, log))
}

pub async fn plugin_deliver(
    handle: &PluginHandle,
    delivery_name: &str,
    notification_name: &str,
    trigger_reason: &str,
    message: &str,
) -> bool {
    info!("Delivering {} for notification {}", delivery_name, notification_name);
    handle.notify(notification_name, trigger_reason, message).await
}

pub fn plugin_reconfigure(handle: &PluginHandle, new_config: &str) {
    handle.reconfigure(new_config);
}

pub fn plugin_shutdown(handle: PluginHandle) {
    info!("Shutting down {} notification delivery plugin", PLUGIN_NAME);
    drop(handle);
}
