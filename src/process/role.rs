/*!
 * Child Roles
 *
 * Children are the debugger binary re-executed as
 * `<program> __ipc-child <role> [args...]`. Each role performs exactly one
 * unit of work and exits.
 */

use crate::core::limits::{CHILD_FLAG, CHILD_USAGE_EXIT_CODE};
use crate::core::timeout::TimeoutPolicy;
use crate::ipc::{pipe, socket};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

const PIPE_WRITER: &str = "pipe-writer";
const SOCKET_LISTENER: &str = "socket-listener";
const SOCKET_CONNECTOR: &str = "socket-connector";

/// Argument used for an unbounded timeout
const NO_TIMEOUT: &str = "none";

/// Role argument errors
#[derive(Error, Debug)]
pub enum RoleError {
    #[error(transparent)]
    Parse(#[from] clap::Error),
}

/// Hidden child command line: `__ipc-child <role> [args...]`
#[derive(Parser, Debug)]
#[command(name = CHILD_FLAG, disable_help_subcommand = true, disable_version_flag = true)]
struct ChildCli {
    #[command(subcommand)]
    role: ChildRole,
}

/// Work a re-executed child performs
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChildRole {
    /// Write the payload to stdout (the pipe write end)
    PipeWriter {
        #[arg(allow_hyphen_values = true)]
        payload: String,
    },

    /// Accept one connection, read one message, report on stdout (the result channel)
    SocketListener {
        addr: SocketAddr,
        #[arg(value_name = "TIMEOUT_MS|none", value_parser = parse_timeout)]
        timeout: TimeoutPolicy,
    },

    /// Wait, connect, send one message
    SocketConnector {
        addr: SocketAddr,
        #[arg(value_name = "DELAY_MS", value_parser = parse_millis)]
        delay: Duration,
        #[arg(value_name = "TIMEOUT_MS|none", value_parser = parse_timeout)]
        timeout: TimeoutPolicy,
        #[arg(allow_hyphen_values = true)]
        payload: String,
    },
}

impl ChildRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PipeWriter { .. } => PIPE_WRITER,
            Self::SocketListener { .. } => SOCKET_LISTENER,
            Self::SocketConnector { .. } => SOCKET_CONNECTOR,
        }
    }

    /// Arguments following `__ipc-child`
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.name().to_string()];
        match self {
            Self::PipeWriter { payload } => args.push(payload.clone()),
            Self::SocketListener { addr, timeout } => {
                args.push(addr.to_string());
                args.push(encode_timeout(timeout));
            }
            Self::SocketConnector {
                addr,
                delay,
                timeout,
                payload,
            } => {
                args.push(addr.to_string());
                args.push(delay.as_millis().to_string());
                args.push(encode_timeout(timeout));
                args.push(payload.clone());
            }
        }
        args
    }

    /// Parse process arguments (without argv[0])
    ///
    /// Returns `Ok(None)` when the arguments do not request a child role.
    pub fn from_args<I, T>(args: I) -> Result<Option<Self>, RoleError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into).peekable();
        match args.peek() {
            Some(flag) if flag.as_os_str() == CHILD_FLAG => {}
            _ => return Ok(None),
        }

        // The flag itself takes the program-name slot
        let cli = ChildCli::try_parse_from(args)?;
        Ok(Some(cli.role))
    }
}

fn encode_timeout(timeout: &TimeoutPolicy) -> String {
    timeout
        .as_millis()
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| NO_TIMEOUT.to_string())
}

fn parse_millis(value: &str) -> Result<Duration, String> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("expected milliseconds: {}", e))
}

fn parse_timeout(value: &str) -> Result<TimeoutPolicy, String> {
    if value == NO_TIMEOUT {
        return Ok(TimeoutPolicy::None);
    }
    parse_millis(value).map(TimeoutPolicy::Ipc)
}

/// Run a child role to completion and map the outcome to an exit code
pub async fn run_child(role: ChildRole) -> ExitCode {
    let name = role.name();
    info!(role = name, pid = std::process::id(), "child started");

    let result = match role {
        ChildRole::PipeWriter { payload } => {
            let mut stdout = std::io::stdout().lock();
            pipe::write_payload(&mut stdout, &payload)
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        ChildRole::SocketListener { addr, timeout } => {
            let mut stdout = std::io::stdout();
            socket::run_listener(addr, timeout, &mut stdout)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        ChildRole::SocketConnector {
            addr,
            delay,
            timeout,
            payload,
        } => socket::send_once(addr, delay, &payload, timeout)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => {
            info!(role = name, "child finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(role = name, error = %e, "child failed");
            ExitCode::FAILURE
        }
    }
}

/// Exit code for a child whose arguments could not be parsed
pub fn usage_exit_code() -> ExitCode {
    ExitCode::from(CHILD_USAGE_EXIT_CODE)
}
