/*!
 * Socket Connector
 * Child side: wait, dial, send one message
 */

use super::types::SocketError;
use crate::core::timeout::TimeoutPolicy;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::info;

/// Sleep `delay`, connect to `addr` and send `payload` as a single write
///
/// The write side is shut down afterwards so the listener sees end of stream.
pub async fn send_once(
    addr: SocketAddr,
    delay: Duration,
    payload: &str,
    timeout: TimeoutPolicy,
) -> Result<usize, SocketError> {
    tokio::time::sleep(delay).await;

    let mut stream = timeout
        .run(TcpStream::connect(addr))
        .await
        .map_err(|elapsed| SocketError::Timeout {
            stage: "connect",
            elapsed,
        })?
        .map_err(|source| SocketError::Connect { addr, source })?;

    let send = async {
        stream.write_all(payload.as_bytes()).await?;
        stream.shutdown().await
    };
    timeout
        .run(send)
        .await
        .map_err(|elapsed| SocketError::Timeout {
            stage: "send",
            elapsed,
        })?
        .map_err(SocketError::Send)?;

    info!(%addr, bytes = payload.len(), "message sent");
    Ok(payload.len())
}
