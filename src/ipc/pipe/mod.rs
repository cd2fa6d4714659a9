/*!
 * Pipe Module
 * Anonymous pipes between the debugger and a child process
 */

pub mod demo;
pub mod endpoint;
pub mod types;
pub mod writer;

// Re-export public API
pub use demo::run_demo;
pub use endpoint::{drain, PipeEnds};
pub use types::{PipeError, PipeOutcome};
pub use writer::write_payload;
