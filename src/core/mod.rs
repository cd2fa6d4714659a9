/*!
 * Core Module
 * Fundamental debugger types, configuration, and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod timeout;
pub mod types;

// Re-export for convenience
pub use config::{ConfigError, DebuggerConfig};
pub use errors::{DemoError, DemoResult};
pub use timeout::{Elapsed, TimeoutPolicy};
pub use types::*;
