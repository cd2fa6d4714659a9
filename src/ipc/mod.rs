/*!
 * IPC Module
 * One demonstration per mechanism: pipes, shared memory, semaphores, sockets
 */

pub mod pipe;
pub mod sem;
pub mod shm;
pub mod socket;

// Re-export for convenience
pub use pipe::{PipeError, PipeOutcome};
pub use sem::{NamedSemaphore, SemaphoreError, SemaphoreOutcome};
pub use shm::{SharedRegion, ShmError, ShmOutcome};
pub use socket::{ChannelMessage, SocketError, SocketOutcome};
