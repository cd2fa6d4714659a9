/*!
 * Semaphore Types
 * Errors and outcomes for named POSIX semaphores
 */

use crate::core::timeout::Elapsed;
use nix::errno::Errno;
use serde::Serialize;
use thiserror::Error;

/// Semaphore error types
#[derive(Debug, Error)]
pub enum SemaphoreError {
    #[error("Invalid semaphore name: {0:?}")]
    InvalidName(String),

    #[error("Initial permits {initial} exceed maximum {max}")]
    InvalidInitial { initial: u32, max: u32 },

    #[error("Cannot open semaphore {name}: {errno}")]
    Open { name: String, errno: Errno },

    #[error("Cannot release semaphore name {name}: {errno}")]
    Unlink { name: String, errno: Errno },

    #[error("Semaphore acquire failed: {0}")]
    Wait(Errno),

    #[error("Semaphore acquire timed out: {0}")]
    Timeout(#[source] Elapsed),

    #[error("Semaphore release failed: {0}")]
    Post(Errno),

    #[error("Release refused: value {value} already at maximum {max}")]
    OverRelease { value: u32, max: u32 },

    #[error("Cannot read semaphore value: {0}")]
    Value(Errno),
}

/// Name used and permit count observed after release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemaphoreOutcome {
    pub name: String,
    pub value_after: u32,
}
