/*!
 * Timeout Policies
 *
 * Every blocking step of a demonstration (child join, pipe drain, accept,
 * semaphore acquire) runs under an explicit policy.
 *
 * ## Timeout Classes
 *
 * - **Lock**: semaphore acquisition
 * - **IPC**: child processes, pipes, sockets
 * - **Custom**: user-defined
 * - **None**: unbounded, use sparingly
 */

use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Timeout policy for blocking operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// No timeout (infinite wait)
    #[default]
    None,

    /// Lock acquisition timeout
    Lock(Duration),

    /// IPC operation timeout
    Ipc(Duration),

    /// Custom timeout
    Custom(Duration),
}

/// A bounded operation ran out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{category} operation timed out after {elapsed_ms}ms")]
pub struct Elapsed {
    pub category: &'static str,
    pub elapsed_ms: u64,
    pub timeout_ms: Option<u64>,
}

impl TimeoutPolicy {
    /// Default lock timeout
    pub const fn default_lock() -> Self {
        Self::Lock(crate::core::limits::SEMAPHORE_ACQUIRE_TIMEOUT)
    }

    /// Default IPC timeout
    pub const fn default_ipc() -> Self {
        Self::Ipc(crate::core::limits::ACCEPT_TIMEOUT)
    }

    /// Get the duration for this policy
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Lock(d) | Self::Ipc(d) | Self::Custom(d) => Some(*d),
        }
    }

    /// Timeout in milliseconds, if bounded
    pub fn as_millis(&self) -> Option<u64> {
        self.duration().map(|d| d.as_millis() as u64)
    }

    /// Get timeout category as string
    pub fn category(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lock(_) => "lock",
            Self::Ipc(_) => "ipc",
            Self::Custom(_) => "custom",
        }
    }

    /// Build the error for an expiry that started at `start`
    pub fn elapsed_error(&self, start: Instant) -> Elapsed {
        Elapsed {
            category: self.category(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            timeout_ms: self.as_millis(),
        }
    }

    /// Drive `future` to completion under this policy
    pub async fn run<F>(&self, future: F) -> Result<F::Output, Elapsed>
    where
        F: Future,
    {
        let start = Instant::now();
        match self.duration() {
            None => Ok(future.await),
            Some(limit) => tokio::time::timeout(limit, future)
                .await
                .map_err(|_| self.elapsed_error(start)),
        }
    }
}
