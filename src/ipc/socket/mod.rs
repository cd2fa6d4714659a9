/*!
 * Socket Module
 * Loopback TCP exchange between two child processes
 */

pub mod channel;
pub mod connector;
pub mod demo;
pub mod listener;
pub mod types;

// Re-export public API
pub use channel::ChannelMessage;
pub use connector::send_once;
pub use demo::run_demo;
pub use listener::{run_listener, serve_once};
pub use types::{ReceivedMessage, SocketError, SocketOutcome};
