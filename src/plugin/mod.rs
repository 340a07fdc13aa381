mod plugin;
pub use plugin::*;
