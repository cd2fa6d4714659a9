/*!
 * Monitoring Module
 * User-visible event log and diagnostic tracing
 */

pub mod sink;
pub mod tracer;

pub use sink::{EventSink, LogEvent, SinkUpdate};
pub use tracer::{generate_trace_id, init_tracing, DemoSpan};
