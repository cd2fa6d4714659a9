/*!
 * Child Registry
 * Tracks every live child so a stop request can kill them all at once
 */

use crate::core::types::Pid;
use ahash::RandomState;
use dashmap::DashMap;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Set of live child processes keyed by OS pid
///
/// Clones share the same set.
#[derive(Clone)]
pub struct ChildRegistry {
    children: Arc<DashMap<Pid, &'static str, RandomState>>,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self {
            children: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    pub fn register(&self, pid: Pid, role: &'static str) {
        self.children.insert(pid, role);
        debug!(pid, role, live = self.children.len(), "child registered");
    }

    pub fn deregister(&self, pid: Pid) {
        if self.children.remove(&pid).is_some() {
            debug!(pid, live = self.children.len(), "child deregistered");
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.children.iter().map(|entry| *entry.key()).collect()
    }

    /// SIGKILL every tracked child, no grace period
    ///
    /// Returns how many children were signalled.
    pub fn kill_all(&self) -> usize {
        let targets: Vec<(Pid, &'static str)> = self
            .children
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();

        let mut killed = 0;
        for (pid, role) in targets {
            match kill(nix::unistd::Pid::from_raw(pid as i32), Signal::SIGKILL) {
                Ok(()) => {
                    info!(pid, role, "killed child");
                    killed += 1;
                }
                Err(Errno::ESRCH) => debug!(pid, role, "child already gone"),
                Err(e) => warn!(pid, role, error = %e, "failed to kill child"),
            }
            self.children.remove(&pid);
        }
        killed
    }
}

impl Default for ChildRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChildRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildRegistry")
            .field("live", &self.pids())
            .finish()
    }
}
