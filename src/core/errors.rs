/*!
 * Error Types
 * Centralized demo error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

pub use super::config::ConfigError;
pub use crate::ipc::pipe::PipeError;
pub use crate::ipc::sem::SemaphoreError;
pub use crate::ipc::shm::ShmError;
pub use crate::ipc::socket::SocketError;
pub use crate::process::{ProcessError, RoleError};

/// Demo result type
pub type DemoResult<T> = Result<T, DemoError>;

/// Any failure that aborts a single demonstration
///
/// Never fatal to the orchestrator: it is caught at the demo boundary and
/// turned into a log line.
#[derive(Error, Debug, Diagnostic)]
pub enum DemoError {
    #[error(transparent)]
    #[diagnostic(
        code(demo::process),
        help("A child process could not be spawned, timed out, or exited abnormally. Check stderr for its diagnostics.")
    )]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(
        code(demo::pipe),
        help("The anonymous pipe could not be created or read.")
    )]
    Pipe(#[from] PipeError),

    #[error(transparent)]
    #[diagnostic(
        code(demo::shm),
        help("POSIX shared memory is unavailable or the name is taken. Check /dev/shm.")
    )]
    Shm(#[from] ShmError),

    #[error(transparent)]
    #[diagnostic(
        code(demo::semaphore),
        help("The named semaphore could not be created, acquired, or released.")
    )]
    Semaphore(#[from] SemaphoreError),

    #[error(transparent)]
    #[diagnostic(
        code(demo::socket),
        help("The loopback listener could not bind, accept, or report back. Another process may hold the port.")
    )]
    Socket(#[from] SocketError),
}
