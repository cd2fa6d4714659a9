/*!
 * Partial Failure Tests
 * One mechanism misbehaving never stops the others
 */

use super::{test_config, TEST_PORT};
use ipc_debugger::core::limits::{COMPLETION_BANNER, START_BANNER};
use ipc_debugger::{DemoStatus, EventSink, Mechanism, Orchestrator};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn test_missing_child_program_fails_only_process_demos() {
    let sink = EventSink::new();
    let config = test_config().with_child_program("/nonexistent/ipc-debugger");
    let orchestrator = Orchestrator::new(config, sink.clone());

    let summary = orchestrator.run_all_demos().await;

    assert_eq!(summary.failed(), vec![Mechanism::Pipe, Mechanism::Socket]);
    let texts = sink.texts();
    assert_eq!(texts.len(), 7);
    assert_eq!(texts[0], START_BANNER);
    assert!(texts[1].starts_with("[PIPE] Failed: Spawn failed for pipe-writer"));
    assert_eq!(texts[2], "[SHM] Written: Shared Memory Data");
    assert_eq!(texts[3], "[SEMAPHORE] Locked");
    assert_eq!(texts[4], "[SEMAPHORE] Unlocked");
    assert!(texts[5].starts_with("[SOCKET] Failed: Spawn failed for socket-listener"));
    assert_eq!(texts[6], COMPLETION_BANNER);
}

#[tokio::test]
#[serial]
async fn test_abnormal_child_exit_is_reported() {
    let sink = EventSink::new();
    let orchestrator = Orchestrator::new(test_config().with_child_program("false"), sink.clone());

    let status = orchestrator.run_pipe_demo().await;

    assert_eq!(status, DemoStatus::Failed);
    assert_eq!(
        sink.texts().len(),
        1,
        "only the failure line is expected: {:?}",
        sink.texts()
    );
    assert!(sink.texts()[0].contains("exited abnormally (exit code 1)"));
}

#[tokio::test]
#[serial]
async fn test_port_in_use_does_not_abort_run() {
    let sink = EventSink::new();
    let orchestrator = Orchestrator::new(test_config(), sink.clone());
    let _occupant = std::net::TcpListener::bind(("127.0.0.1", TEST_PORT)).unwrap();

    let summary = orchestrator.run_all_demos().await;

    assert_eq!(summary.failed(), vec![Mechanism::Socket]);
    let texts = sink.texts();
    assert!(texts.iter().any(|t| t.starts_with("[SOCKET] Listener failed: Cannot bind")));
    assert!(texts.iter().any(|t| t.starts_with("[SOCKET] Failed:")));
    assert_eq!(texts.last().map(String::as_str), Some(COMPLETION_BANNER));
}

#[tokio::test]
#[serial]
async fn test_stop_kills_children_mid_demo() {
    let sink = EventSink::new();
    let config = test_config().with_connector_delay(Duration::from_secs(5));
    let orchestrator = Orchestrator::new(config, sink.clone());

    let stopper = async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(orchestrator.registry().len(), 2);
        orchestrator.stop()
    };
    let (status, killed) = tokio::join!(orchestrator.run_socket_demo(), stopper);

    assert_eq!(killed, 2);
    assert_eq!(status, DemoStatus::Failed);
    assert!(orchestrator.registry().is_empty());
    assert!(sink
        .texts()
        .iter()
        .any(|t| t.contains("killed by SIGKILL")));
}
