/*!
 * Pipe Types
 * Errors and outcomes for the anonymous pipe demo
 */

use crate::core::timeout::Elapsed;
use serde::Serialize;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Pipe error types
#[derive(Debug, Error)]
pub enum PipeError {
    #[error("Pipe creation failed: {0}")]
    Create(#[source] nix::Error),

    #[error("Pipe read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("Pipe read did not reach end of stream: {0}")]
    Timeout(#[source] Elapsed),

    #[error("Pipe payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// What the parent received through the pipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipeOutcome {
    pub payload: String,
    pub child_pid: u32,
}
