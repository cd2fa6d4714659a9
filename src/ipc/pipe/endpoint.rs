/*!
 * Pipe Endpoints
 * Anonymous pipes whose ends are handed to exactly one child
 */

use super::types::PipeError;
use crate::core::timeout::TimeoutPolicy;
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use std::os::fd::OwnedFd;
use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe;

/// Both ends of a fresh pipe
///
/// Both descriptors are close-on-exec: only an end explicitly installed as a
/// child's stdio survives into that child.
#[derive(Debug)]
pub struct PipeEnds {
    pub read: OwnedFd,
    pub write: OwnedFd,
}

impl PipeEnds {
    pub fn open() -> Result<Self, PipeError> {
        let (read, write) = pipe2(OFlag::O_CLOEXEC).map_err(PipeError::Create)?;
        Ok(Self { read, write })
    }

    pub fn split(self) -> (OwnedFd, OwnedFd) {
        (self.read, self.write)
    }
}

/// Read until every write end is closed
///
/// Must run inside a tokio runtime.
pub async fn drain(read: OwnedFd, timeout: TimeoutPolicy) -> Result<Vec<u8>, PipeError> {
    let mut receiver = pipe::Receiver::from_owned_fd(read).map_err(PipeError::Read)?;
    let mut buffer = Vec::new();

    timeout
        .run(receiver.read_to_end(&mut buffer))
        .await
        .map_err(PipeError::Timeout)?
        .map_err(PipeError::Read)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drain_reads_to_eof() {
        let (read, write) = PipeEnds::open().unwrap().split();
        {
            let mut writer = File::from(write);
            writer.write_all(b"through the pipe").unwrap();
        }

        let data = drain(read, TimeoutPolicy::Ipc(Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(data, b"through the pipe");
    }

    #[tokio::test]
    async fn test_drain_times_out_while_writer_open() {
        let (read, write) = PipeEnds::open().unwrap().split();

        let result = drain(read, TimeoutPolicy::Ipc(Duration::from_millis(50))).await;
        assert!(matches!(result, Err(PipeError::Timeout(_))));
        drop(write);
    }
}
