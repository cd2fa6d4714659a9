/*!
 * Socket Demo Tests
 * Listener and connector children over loopback TCP
 */

use super::{test_config, TEST_PORT};
use ipc_debugger::ipc::socket;
use ipc_debugger::process::ProcessError;
use ipc_debugger::{ChildLauncher, DemoError, EventSink};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn test_socket_demo_exchanges_message() {
    let config = test_config();
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();

    let outcome = socket::run_demo(&config, &launcher, &sink).await.unwrap();

    assert_eq!(
        outcome.received().collect::<Vec<_>>(),
        vec!["Hello from socket client!"]
    );
    assert_eq!(
        sink.texts(),
        vec!["[SOCKET] Received: Hello from socket client!"]
    );
    assert!(launcher.registry().is_empty());
}

#[tokio::test]
#[serial]
async fn test_socket_demo_runs_twice_on_same_port() {
    let config = test_config();
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();

    socket::run_demo(&config, &launcher, &sink).await.unwrap();
    socket::run_demo(&config, &launcher, &sink).await.unwrap();

    assert_eq!(sink.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_socket_demo_reports_port_in_use() {
    let config = test_config();
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();
    let _occupant = std::net::TcpListener::bind(("127.0.0.1", TEST_PORT)).unwrap();

    let result = socket::run_demo(&config, &launcher, &sink).await;

    assert!(matches!(
        result,
        Err(DemoError::Process(ProcessError::AbnormalExit { role: "socket-listener", .. }))
    ));
    let texts = sink.texts();
    assert_eq!(texts.len(), 1);
    assert!(
        texts[0].starts_with("[SOCKET] Listener failed: Cannot bind"),
        "unexpected line: {}",
        texts[0]
    );
}

#[tokio::test]
#[serial]
async fn test_socket_demo_accept_timeout_does_not_hang() {
    let config = test_config()
        .with_accept_timeout(Duration::from_millis(200))
        .with_connector_delay(Duration::from_millis(1000));
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();

    let result = socket::run_demo(&config, &launcher, &sink).await;

    assert!(result.is_err());
    let texts = sink.texts();
    assert_eq!(texts.len(), 1);
    assert!(
        texts[0].contains("Socket accept timed out"),
        "unexpected line: {}",
        texts[0]
    );
}
