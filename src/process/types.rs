/*!
 * Process Types
 * Errors and helpers for child process management
 */

use crate::core::timeout::Elapsed;
use crate::core::types::Pid;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Child process errors
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Spawn failed for {role}: {reason}")]
    SpawnFailed { role: &'static str, reason: String },

    #[error("Child {role} exited before its pid could be read")]
    MissingPid { role: &'static str },

    #[error("Waiting for child {role} (pid {pid}) failed: {source}")]
    WaitFailed {
        role: &'static str,
        pid: Pid,
        source: std::io::Error,
    },

    #[error("Child {role} (pid {pid}) did not exit in time: {elapsed}")]
    Timeout {
        role: &'static str,
        pid: Pid,
        elapsed: Elapsed,
    },

    #[error("Child {role} (pid {pid}) exited abnormally ({status})")]
    AbnormalExit {
        role: &'static str,
        pid: Pid,
        status: String,
    },
}

/// Human-readable exit status, naming the signal for killed children
pub fn describe_status(status: &ExitStatus) -> String {
    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exit code {}", code),
        (None, Some(signal)) => match nix::sys::signal::Signal::try_from(signal) {
            Ok(sig) => format!("killed by {}", sig.as_str()),
            Err(_) => format!("killed by signal {}", signal),
        },
        (None, None) => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitStatus;

    #[test]
    fn test_describe_status() {
        assert_eq!(describe_status(&ExitStatus::from_raw(0)), "exit code 0");
        // Raw wait status: exit code lives in the second byte
        assert_eq!(describe_status(&ExitStatus::from_raw(3 << 8)), "exit code 3");
        assert_eq!(describe_status(&ExitStatus::from_raw(9)), "killed by SIGKILL");
    }
}
