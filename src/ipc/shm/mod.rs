/*!
 * Shared Memory Module
 * Named POSIX shared memory with scoped release
 */

pub mod demo;
pub mod segment;
pub mod types;

// Re-export public API
pub use demo::run_demo;
pub use segment::SharedRegion;
pub use types::{ShmError, ShmOutcome};
