/*!
 * Socket Listener
 * Child side: one bind, one accept, one bounded read
 */

use super::channel::ChannelMessage;
use super::types::{ReceivedMessage, SocketError};
use crate::core::limits::RECV_BUFFER_SIZE;
use crate::core::timeout::TimeoutPolicy;
use std::io::Write;
use std::net::SocketAddr;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Accept exactly one connection on `addr` and read one message from it
///
/// Accept and read are each bounded by `timeout`. The read stops at end of
/// stream or once the receive buffer is full.
pub async fn serve_once(
    addr: SocketAddr,
    timeout: TimeoutPolicy,
) -> Result<ReceivedMessage, SocketError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| SocketError::Bind { addr, source })?;
    info!(%addr, "listening");

    let (mut stream, peer) = timeout
        .run(listener.accept())
        .await
        .map_err(|elapsed| SocketError::Timeout {
            stage: "accept",
            elapsed,
        })?
        .map_err(SocketError::Accept)?;
    debug!(%peer, "accepted connection");

    let mut buffer = vec![0u8; RECV_BUFFER_SIZE];
    let read_all = async {
        let mut filled = 0;
        while filled < buffer.len() {
            match stream.read(&mut buffer[filled..]).await? {
                0 => break,
                n => filled += n,
            }
        }
        Ok::<_, std::io::Error>(filled)
    };
    let bytes = timeout
        .run(read_all)
        .await
        .map_err(|elapsed| SocketError::Timeout {
            stage: "read",
            elapsed,
        })?
        .map_err(SocketError::Read)?;

    let text = String::from_utf8_lossy(&buffer[..bytes]).into_owned();
    Ok(ReceivedMessage { text, peer, bytes })
}

/// Serve once and publish the result on `out`, failures included
pub async fn run_listener<W: Write>(
    addr: SocketAddr,
    timeout: TimeoutPolicy,
    out: &mut W,
) -> Result<ReceivedMessage, SocketError> {
    match serve_once(addr, timeout).await {
        Ok(message) => {
            ChannelMessage::from(&message).publish(out)?;
            info!(peer = %message.peer, bytes = message.bytes, "message received");
            Ok(message)
        }
        Err(e) => {
            let report = ChannelMessage::Failed {
                error: e.to_string(),
            };
            if let Err(publish_err) = report.publish(out) {
                warn!(error = %publish_err, "could not report listener failure");
            }
            Err(e)
        }
    }
}
