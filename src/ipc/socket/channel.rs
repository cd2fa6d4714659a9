/*!
 * Result Channel Codec
 *
 * The listener child reports back over its stdout as newline-delimited JSON.
 * One line per message; the parent decodes the whole stream after EOF.
 */

use super::types::{ReceivedMessage, SocketError};
use crate::core::types::Mechanism;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A single result line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelMessage {
    Received {
        text: String,
        peer: String,
        bytes: usize,
    },
    Failed {
        error: String,
    },
}

impl ChannelMessage {
    pub fn is_received(&self) -> bool {
        matches!(self, Self::Received { .. })
    }

    /// Event log line for this message
    pub fn log_line(&self) -> String {
        let tag = Mechanism::Socket.tag();
        match self {
            Self::Received { text, .. } => format!("{tag} Received: {text}"),
            Self::Failed { error } => format!("{tag} Listener failed: {error}"),
        }
    }

    /// Write one JSON line and flush so the parent sees it before exit
    pub fn publish<W: Write>(&self, out: &mut W) -> Result<(), SocketError> {
        let mut line = serde_json::to_vec(self).map_err(SocketError::Encode)?;
        line.push(b'\n');
        out.write_all(&line).map_err(SocketError::ChannelWrite)?;
        out.flush().map_err(SocketError::ChannelWrite)
    }

    /// Decode every message in a drained channel
    pub fn decode_all(bytes: &[u8]) -> Result<Vec<Self>, SocketError> {
        serde_json::Deserializer::from_slice(bytes)
            .into_iter::<Self>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(SocketError::Decode)
    }
}

impl From<&ReceivedMessage> for ChannelMessage {
    fn from(message: &ReceivedMessage) -> Self {
        Self::Received {
            text: message.text.clone(),
            peer: message.peer.to_string(),
            bytes: message.bytes,
        }
    }
}
