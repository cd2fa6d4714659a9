/*!
 * Core Types
 * Common types used across the debugger
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// OS process ID type
pub type Pid = u32;

/// Size type for buffers and regions
pub type Size = usize;

/// The four demonstrated IPC mechanisms, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    Pipe,
    SharedMemory,
    Semaphore,
    Socket,
}

impl Mechanism {
    /// Fixed run order
    pub const SEQUENCE: [Mechanism; 4] = [
        Mechanism::Pipe,
        Mechanism::SharedMemory,
        Mechanism::Semaphore,
        Mechanism::Socket,
    ];

    /// Log line prefix
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pipe => "[PIPE]",
            Self::SharedMemory => "[SHM]",
            Self::Semaphore => "[SEMAPHORE]",
            Self::Socket => "[SOCKET]",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::SharedMemory => "shm",
            Self::Semaphore => "semaphore",
            Self::Socket => "socket",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one demonstration as seen by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    Completed,
    Failed,
}

impl DemoStatus {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
