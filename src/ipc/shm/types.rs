/*!
 * Shared Memory Types
 * Errors and outcomes for POSIX shared memory regions
 */

use crate::core::types::Size;
use nix::errno::Errno;
use serde::Serialize;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Shared memory error types
#[derive(Debug, Error)]
pub enum ShmError {
    /// Regions must hold at least one byte
    #[error("Invalid size: {0} bytes")]
    InvalidSize(Size),

    #[error("Cannot open shared memory object {name}: {errno}")]
    Open { name: String, errno: Errno },

    #[error("Cannot size shared memory object {name} to {size} bytes: {errno}")]
    Truncate {
        name: String,
        size: Size,
        errno: Errno,
    },

    #[error("Cannot map shared memory object {name}: {errno}")]
    Map { name: String, errno: Errno },

    #[error("Invalid offset or size: offset {offset}, size {size}, segment size {segment_size}")]
    InvalidRange {
        offset: Size,
        size: Size,
        segment_size: Size,
    },

    #[error("Shared memory content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// What the demo read back, and the name it used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShmOutcome {
    pub region_name: String,
    pub size: Size,
    pub content: String,
}
