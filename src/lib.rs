/*!
 * IPC Debugger Library
 *
 * Demonstrates four inter-process communication mechanisms (anonymous pipes,
 * POSIX shared memory, named semaphores, loopback TCP sockets) and reduces
 * each outcome to a timestamped line in an ordered event log.
 */

pub mod core;
pub mod ipc;
pub mod monitoring;
pub mod orchestrator;
pub mod process;

// Re-exports
pub use crate::core::{
    ConfigError, DebuggerConfig, DemoError, DemoResult, DemoStatus, Mechanism, TimeoutPolicy,
};
pub use ipc::{ChannelMessage, PipeOutcome, SemaphoreOutcome, ShmOutcome, SocketOutcome};
pub use monitoring::{init_tracing, EventSink, LogEvent, SinkUpdate};
pub use orchestrator::{Orchestrator, RunSummary};
pub use process::{run_child, ChildLauncher, ChildRegistry, ChildRole};
