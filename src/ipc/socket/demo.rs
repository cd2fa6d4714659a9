/*!
 * Socket Demo
 *
 * Two children on loopback TCP: a listener that reports back through a
 * result channel and a connector that sends one message. Both are joined
 * before the channel is drained.
 */

use super::channel::ChannelMessage;
use super::types::{SocketError, SocketOutcome};
use crate::core::errors::DemoResult;
use crate::core::DebuggerConfig;
use crate::ipc::pipe::{drain, PipeEnds};
use crate::monitoring::EventSink;
use crate::process::{ChildLauncher, ChildRole};
use std::process::Stdio;
use tracing::info;

/// Run one listener/connector exchange and report every channel message
///
/// Messages are reported before child failures are surfaced, so a listener
/// that failed to bind still leaves its reason in the log.
pub async fn run_demo(
    config: &DebuggerConfig,
    launcher: &ChildLauncher,
    sink: &EventSink,
) -> DemoResult<SocketOutcome> {
    let addr = config.socket_addr();
    let (read, write) = PipeEnds::open()?.split();

    let listener = launcher.spawn(
        &ChildRole::SocketListener {
            addr,
            timeout: config.accept_timeout,
        },
        Stdio::from(write),
    )?;
    let connector = launcher.spawn(
        &ChildRole::SocketConnector {
            addr,
            delay: config.connector_delay,
            timeout: config.accept_timeout,
            payload: config.socket_payload.clone(),
        },
        Stdio::null(),
    )?;

    let (listener_exit, connector_exit) = tokio::join!(
        listener.wait_success(config.child_timeout),
        connector.wait_success(config.child_timeout)
    );

    let bytes = drain(read, config.child_timeout).await?;
    let messages = ChannelMessage::decode_all(&bytes)?;
    for message in &messages {
        sink.report(message.log_line());
    }

    listener_exit?;
    connector_exit?;

    if !messages.iter().any(ChannelMessage::is_received) {
        return Err(SocketError::NoResult.into());
    }

    info!(%addr, messages = messages.len(), "socket exchange complete");
    Ok(SocketOutcome { messages })
}
