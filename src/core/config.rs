/*!
 * Debugger Configuration
 *
 * Fixed defaults from `limits`, assembled once per run. The `with_*`
 * builders exist so tests can shorten delays or move the socket port;
 * the binary never exposes them.
 */

use super::limits::{
    CHILD_EXIT_TIMEOUT, CONNECTOR_DELAY, PIPE_PAYLOAD, RECV_BUFFER_SIZE, SEMAPHORE_HOLD,
    SHM_PAYLOAD, SOCKET_HOST, SOCKET_PAYLOAD, SOCKET_PORT,
};
use super::timeout::TimeoutPolicy;
use miette::Diagnostic;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Cannot resolve the debugger executable: {0}")]
    #[diagnostic(
        code(config::child_program),
        help("Child processes re-execute the debugger binary. Run it from a readable location.")
    )]
    ChildProgram(#[source] std::io::Error),

    #[error("{field} payload must not be empty")]
    #[diagnostic(code(config::empty_payload))]
    EmptyPayload { field: &'static str },

    #[error("Socket payload is {size} bytes, receive buffer holds {max}")]
    #[diagnostic(
        code(config::payload_too_large),
        help("The listener reads a single buffer; the message must fit in one read.")
    )]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Socket port must be non-zero")]
    #[diagnostic(code(config::invalid_port))]
    InvalidPort,
}

/// Settings shared by every demonstration in a run
#[derive(Debug, Clone)]
pub struct DebuggerConfig {
    child_program: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub pipe_payload: String,
    pub shm_payload: String,
    pub socket_payload: String,
    pub semaphore_hold: Duration,
    pub semaphore_timeout: TimeoutPolicy,
    pub connector_delay: Duration,
    pub accept_timeout: TimeoutPolicy,
    pub child_timeout: TimeoutPolicy,
}

impl DebuggerConfig {
    /// Defaults, re-executing the running binary for child processes
    pub fn new() -> Result<Self, ConfigError> {
        let program = std::env::current_exe().map_err(ConfigError::ChildProgram)?;
        Ok(Self::with_program(program))
    }

    /// Defaults, using `program` for child processes
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            child_program: program.into(),
            host: IpAddr::V4(SOCKET_HOST),
            port: SOCKET_PORT,
            pipe_payload: PIPE_PAYLOAD.to_string(),
            shm_payload: SHM_PAYLOAD.to_string(),
            socket_payload: SOCKET_PAYLOAD.to_string(),
            semaphore_hold: SEMAPHORE_HOLD,
            semaphore_timeout: TimeoutPolicy::default_lock(),
            connector_delay: CONNECTOR_DELAY,
            accept_timeout: TimeoutPolicy::default_ipc(),
            child_timeout: TimeoutPolicy::Ipc(CHILD_EXIT_TIMEOUT),
        }
    }

    pub fn child_program(&self) -> &Path {
        &self.child_program
    }

    /// Listener address for the socket demo
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn with_child_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.child_program = program.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_semaphore_hold(mut self, hold: Duration) -> Self {
        self.semaphore_hold = hold;
        self
    }

    pub fn with_connector_delay(mut self, delay: Duration) -> Self {
        self.connector_delay = delay;
        self
    }

    pub fn with_accept_timeout(mut self, timeout: Duration) -> Self {
        self.accept_timeout = TimeoutPolicy::Ipc(timeout);
        self
    }

    pub fn with_child_timeout(mut self, timeout: Duration) -> Self {
        self.child_timeout = TimeoutPolicy::Ipc(timeout);
        self
    }

    /// Reject settings no demonstration can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, payload) in [
            ("pipe", &self.pipe_payload),
            ("shared memory", &self.shm_payload),
            ("socket", &self.socket_payload),
        ] {
            if payload.is_empty() {
                return Err(ConfigError::EmptyPayload { field });
            }
        }

        if self.socket_payload.len() > RECV_BUFFER_SIZE {
            return Err(ConfigError::PayloadTooLarge {
                size: self.socket_payload.len(),
                max: RECV_BUFFER_SIZE,
            });
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        Ok(())
    }
}
