//! Common utilities and types for the Expo attendance dashboard

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ExpoError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
