mod transport;
pub use transport::*;
