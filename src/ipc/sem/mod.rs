/*!
 * Semaphore Module
 * Named POSIX counting semaphores with guarded permits
 */

pub mod demo;
pub mod semaphore;
pub mod types;

// Re-export public API
pub use demo::run_demo;
pub use semaphore::{NamedSemaphore, SemaphorePermit};
pub use types::{SemaphoreError, SemaphoreOutcome};
