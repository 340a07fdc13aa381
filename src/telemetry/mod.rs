mod telemetry;
pub use telemetry::*;
