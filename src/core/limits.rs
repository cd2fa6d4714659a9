/*!
 * Debugger Limits and Constants
 *
 * Fixed defaults for every demonstration: endpoints, payloads, buffer sizes,
 * pacing delays and timeouts. Grouped by mechanism.
 */

use std::net::Ipv4Addr;
use std::time::Duration;

// =============================================================================
// EVENT LOG
// =============================================================================

/// First line of every run
pub const START_BANNER: &str = "---- IPC Debugger ----";

/// Last line of every run
pub const COMPLETION_BANNER: &str = "IPC Monitoring Completed!";

/// Broadcast buffer for live subscribers of the event sink
/// Slow presenters that fall further behind than this skip ahead
pub const SINK_BROADCAST_CAPACITY: usize = 256;

/// Clock format used when rendering log lines
pub const LOG_CLOCK_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[hour]:[minute]:[second]");

// =============================================================================
// PIPE
// =============================================================================

/// Payload written by the pipe child
pub const PIPE_PAYLOAD: &str = "Hello from child process through pipe";

// =============================================================================
// SHARED MEMORY
// =============================================================================

/// Payload written into the shared segment (the segment is sized to fit it exactly)
pub const SHM_PAYLOAD: &str = "Shared Memory Data";

/// Prefix of shared memory object names
/// [LINUX-COMPAT] POSIX names must start with a single slash
pub const SHM_NAME_PREFIX: &str = "/ipc-debugger-shm";

/// Permission bits for shared memory objects (owner read/write)
pub const SHM_MODE: u32 = 0o600;

// =============================================================================
// SEMAPHORE
// =============================================================================

/// Initial permit count (binary semaphore)
pub const SEMAPHORE_INITIAL_PERMITS: u32 = 1;

/// Maximum permit count; releasing beyond this is refused
pub const SEMAPHORE_MAX_PERMITS: u32 = 1;

/// Simulated critical-section work while the semaphore is held
pub const SEMAPHORE_HOLD: Duration = Duration::from_secs(1);

/// Acquire bound for the semaphore
pub const SEMAPHORE_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(1);

/// Prefix of named semaphore names
pub const SEM_NAME_PREFIX: &str = "/ipc-debugger-sem";

/// Permission bits for named semaphores (owner read/write)
pub const SEM_MODE: u32 = 0o600;

// =============================================================================
// SOCKET
// =============================================================================

/// Loopback host for the socket demo
pub const SOCKET_HOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Fixed listening port
pub const SOCKET_PORT: u16 = 65432;

/// Message sent by the connector
pub const SOCKET_PAYLOAD: &str = "Hello from socket client!";

/// Bytes read by the listener from its single connection
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Delay before the connector dials, so the listener has bound first
pub const CONNECTOR_DELAY: Duration = Duration::from_secs(1);

/// Bound on accept, read and connect in the socket children
pub const ACCEPT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// CHILD PROCESSES
// =============================================================================

/// Hidden first argument that switches the binary into a child role
pub const CHILD_FLAG: &str = "__ipc-child";

/// Bound on joining a child (and on reading its pipe output)
/// Must exceed CONNECTOR_DELAY + ACCEPT_TIMEOUT so socket children finish first
pub const CHILD_EXIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Exit code for a child that could not parse its role arguments
pub const CHILD_USAGE_EXIT_CODE: u8 = 2;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Demos slower than this are logged as warnings
pub const SLOW_DEMO_THRESHOLD: Duration = Duration::from_secs(5);
