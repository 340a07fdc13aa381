pub mod configuration;
pub mod error;
pub mod notifications;
pub mod plugin;
pub mod telemetry;
pub mod traits;
pub mod transport;
