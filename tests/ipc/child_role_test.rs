/*!
 * Child Role Tests
 * The binary invoked directly in its hidden child mode
 */

use pretty_assertions::assert_eq;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_ipc-debugger");

#[test]
fn test_pipe_writer_prints_payload_only() {
    let output = Command::new(BIN)
        .args(["__ipc-child", "pipe-writer", "payload over stdout"])
        .env("RUST_LOG", "debug")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"payload over stdout");
}

#[test]
fn test_unknown_role_exits_with_usage_code() {
    let status = Command::new(BIN)
        .args(["__ipc-child", "fifo-reader"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn test_listener_publishes_failure_line() {
    let occupant = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = occupant.local_addr().unwrap();

    let output = Command::new(BIN)
        .args(["__ipc-child", "socket-listener", &addr.to_string(), "200"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let line = String::from_utf8(output.stdout).unwrap();
    assert!(line.starts_with("{\"kind\":\"failed\""), "got {}", line);
    assert!(line.ends_with('\n'));
}

#[test]
fn test_non_utf8_argument_is_a_usage_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let status = Command::new(BIN)
        .arg("__ipc-child")
        .arg("pipe-writer")
        .arg(OsStr::from_bytes(b"bad \xff payload"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
}
