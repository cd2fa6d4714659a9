/*!
 * Child Launcher
 * Spawns re-executed children and joins them under a timeout
 */

use super::registry::ChildRegistry;
use super::role::ChildRole;
use super::types::{describe_status, ProcessError, ProcessResult};
use crate::core::limits::CHILD_FLAG;
use crate::core::timeout::TimeoutPolicy;
use crate::core::types::Pid;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Spawns child roles from a single program path
#[derive(Debug, Clone)]
pub struct ChildLauncher {
    program: PathBuf,
    registry: ChildRegistry,
}

impl ChildLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            registry: ChildRegistry::new(),
        }
    }

    pub fn registry(&self) -> &ChildRegistry {
        &self.registry
    }

    /// Spawn `role` with `stdout` as its only extra endpoint
    ///
    /// stdin is null and stderr is inherited so child diagnostics reach the
    /// parent's terminal.
    pub fn spawn(&self, role: &ChildRole, stdout: Stdio) -> ProcessResult<SpawnedChild> {
        let name = role.name();

        let mut command = Command::new(&self.program);
        command
            .arg(CHILD_FLAG)
            .args(role.to_args())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
            role: name,
            reason: format!("{}: {}", self.program.display(), e),
        })?;
        // Closes the parent's copy of whatever endpoint was handed to the child
        drop(command);

        let pid = child.id().ok_or(ProcessError::MissingPid { role: name })?;
        self.registry.register(pid, name);
        info!(role = name, pid, program = %self.program.display(), "spawned child");

        Ok(SpawnedChild {
            role: name,
            pid,
            child,
            registry: self.registry.clone(),
        })
    }
}

/// A live child owned by exactly one demo call
///
/// Dropping the handle kills the child if it is still running and removes it
/// from the registry.
#[derive(Debug)]
pub struct SpawnedChild {
    role: &'static str,
    pid: Pid,
    child: Child,
    registry: ChildRegistry,
}

impl SpawnedChild {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Join the child; on expiry the child is killed
    pub async fn wait(mut self, timeout: TimeoutPolicy) -> ProcessResult<ExitStatus> {
        let outcome = timeout.run(self.child.wait()).await;
        match outcome {
            Ok(Ok(status)) => {
                debug!(role = self.role, pid = self.pid, status = %status, "child exited");
                Ok(status)
            }
            Ok(Err(source)) => Err(ProcessError::WaitFailed {
                role: self.role,
                pid: self.pid,
                source,
            }),
            Err(elapsed) => {
                warn!(role = self.role, pid = self.pid, %elapsed, "child timed out, killing");
                if let Err(e) = self.child.start_kill() {
                    warn!(role = self.role, pid = self.pid, error = %e, "kill after timeout failed");
                }
                Err(ProcessError::Timeout {
                    role: self.role,
                    pid: self.pid,
                    elapsed,
                })
            }
        }
    }

    /// Join the child and require a zero exit status
    pub async fn wait_success(self, timeout: TimeoutPolicy) -> ProcessResult<ExitStatus> {
        let (role, pid) = (self.role, self.pid);
        let status = self.wait(timeout).await?;
        if status.success() {
            Ok(status)
        } else {
            Err(ProcessError::AbnormalExit {
                role,
                pid,
                status: describe_status(&status),
            })
        }
    }
}

impl Drop for SpawnedChild {
    fn drop(&mut self) {
        self.registry.deregister(self.pid);
    }
}
