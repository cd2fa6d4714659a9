/*!
 * Pipe Demo Tests
 * Parent/child transfer over an anonymous pipe
 */

use super::test_config;
use ipc_debugger::ipc::pipe;
use ipc_debugger::process::ProcessError;
use ipc_debugger::{ChildLauncher, DemoError, EventSink};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_pipe_demo_delivers_payload() {
    let config = test_config();
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();

    let outcome = pipe::run_demo(&config, &launcher, &sink).await.unwrap();

    assert_eq!(outcome.payload, "Hello from child process through pipe");
    assert!(outcome.child_pid > 0);
    assert_eq!(
        sink.texts(),
        vec!["[PIPE] Received: Hello from child process through pipe"]
    );
    assert!(launcher.registry().is_empty());
}

#[tokio::test]
async fn test_pipe_demo_preserves_payload_bytes() {
    let mut config = test_config();
    config.pipe_payload = "  spaced\tpayload ünïcode  ".to_string();
    let launcher = ChildLauncher::new(config.child_program());
    let sink = EventSink::new();

    let outcome = pipe::run_demo(&config, &launcher, &sink).await.unwrap();
    assert_eq!(outcome.payload, config.pipe_payload);
}

#[tokio::test]
async fn test_pipe_demo_spawn_failure() {
    let config = test_config();
    let launcher = ChildLauncher::new("/nonexistent/ipc-debugger");
    let sink = EventSink::new();

    let result = pipe::run_demo(&config, &launcher, &sink).await;

    assert!(matches!(
        result,
        Err(DemoError::Process(ProcessError::SpawnFailed { role: "pipe-writer", .. }))
    ));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_pipe_demo_abnormal_exit() {
    let config = test_config();
    // `false` ignores its arguments, writes nothing and exits 1
    let launcher = ChildLauncher::new("false");
    let sink = EventSink::new();

    let result = pipe::run_demo(&config, &launcher, &sink).await;

    match result {
        Err(DemoError::Process(ProcessError::AbnormalExit { role, status, .. })) => {
            assert_eq!(role, "pipe-writer");
            assert_eq!(status, "exit code 1");
        }
        other => panic!("expected abnormal exit, got {:?}", other),
    }
    assert!(sink.is_empty());
    assert!(launcher.registry().is_empty());
}
