/*!
 * Socket Types
 * Errors and outcomes for the loopback socket demo
 */

use super::channel::ChannelMessage;
use crate::core::timeout::Elapsed;
use serde::Serialize;
use std::net::SocketAddr;
use thiserror::Error;

/// Socket error types
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("Read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("Cannot connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Send failed: {0}")]
    Send(#[source] std::io::Error),

    #[error("Socket {stage} timed out: {elapsed}")]
    Timeout {
        stage: &'static str,
        #[source]
        elapsed: Elapsed,
    },

    #[error("Cannot encode channel message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed channel message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Cannot write to result channel: {0}")]
    ChannelWrite(#[source] std::io::Error),

    #[error("Listener exited without reporting a result")]
    NoResult,
}

/// One message as the listener read it off the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub text: String,
    pub peer: SocketAddr,
    pub bytes: usize,
}

/// Every message drained from the result channel, in FIFO order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocketOutcome {
    pub messages: Vec<ChannelMessage>,
}

impl SocketOutcome {
    /// Texts of the successfully received messages
    pub fn received(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            ChannelMessage::Received { text, .. } => Some(text.as_str()),
            ChannelMessage::Failed { .. } => None,
        })
    }
}
