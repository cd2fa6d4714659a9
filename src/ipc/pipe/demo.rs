/*!
 * Pipe Demo
 * One child, one message, one unidirectional byte stream
 */

use super::endpoint::{drain, PipeEnds};
use super::types::{PipeError, PipeOutcome};
use crate::core::errors::DemoResult;
use crate::core::types::Mechanism;
use crate::core::DebuggerConfig;
use crate::monitoring::EventSink;
use crate::process::{ChildLauncher, ChildRole};
use std::process::Stdio;
use tracing::info;

/// Spawn a writer child on the pipe's write end and report what arrives
///
/// Reads to end of stream first, then joins the child.
pub async fn run_demo(
    config: &DebuggerConfig,
    launcher: &ChildLauncher,
    sink: &EventSink,
) -> DemoResult<PipeOutcome> {
    let (read, write) = PipeEnds::open()?.split();

    let role = ChildRole::PipeWriter {
        payload: config.pipe_payload.clone(),
    };
    let child = launcher.spawn(&role, Stdio::from(write))?;
    let child_pid = child.pid();

    let bytes = drain(read, config.child_timeout).await?;
    child.wait_success(config.child_timeout).await?;

    let payload = String::from_utf8(bytes).map_err(PipeError::from)?;
    info!(child_pid, bytes = payload.len(), "pipe payload received");
    sink.report(format!("{} Received: {}", Mechanism::Pipe.tag(), payload));

    Ok(PipeOutcome { payload, child_pid })
}
