/*!
 * Full Run Tests
 * Ordering, rendering and repeatability of the complete sequence
 */

use super::test_config;
use ipc_debugger::{EventSink, Mechanism, Orchestrator, SinkUpdate};
use pretty_assertions::assert_eq;
use serial_test::serial;

const EXPECTED: [&str; 7] = [
    "---- IPC Debugger ----",
    "[PIPE] Received: Hello from child process through pipe",
    "[SHM] Written: Shared Memory Data",
    "[SEMAPHORE] Locked",
    "[SEMAPHORE] Unlocked",
    "[SOCKET] Received: Hello from socket client!",
    "IPC Monitoring Completed!",
];

fn is_clock_prefixed(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > 11
        && bytes[0] == b'['
        && bytes[3] == b':'
        && bytes[6] == b':'
        && bytes[9] == b']'
        && bytes[10] == b' '
        && [1, 2, 4, 5, 7, 8].iter().all(|&i| bytes[i].is_ascii_digit())
}

#[tokio::test]
#[serial]
async fn test_full_run_logs_in_order() {
    let sink = EventSink::new();
    let orchestrator = Orchestrator::new(test_config(), sink.clone());

    let summary = orchestrator.run_all_demos().await;

    assert!(summary.all_completed(), "failed: {:?}", summary.failed());
    assert_eq!(
        summary
            .statuses()
            .iter()
            .map(|(m, _)| *m)
            .collect::<Vec<_>>(),
        Mechanism::SEQUENCE.to_vec()
    );
    assert_eq!(sink.texts(), EXPECTED.to_vec());

    let lines = sink.lines();
    assert!(lines.iter().all(|l| is_clock_prefixed(l)), "{:?}", lines);
    let seqs: Vec<u64> = sink.events().iter().map(|e| e.seq).collect();
    assert_eq!(seqs, (1..=7).collect::<Vec<u64>>());
    assert!(orchestrator.registry().is_empty());
}

#[tokio::test]
#[serial]
async fn test_second_run_starts_from_clean_log() {
    let sink = EventSink::new();
    let orchestrator = Orchestrator::new(test_config(), sink.clone());

    assert!(orchestrator.run_all_demos().await.all_completed());
    assert!(orchestrator.run_all_demos().await.all_completed());

    assert_eq!(sink.texts(), EXPECTED.to_vec());
    assert_eq!(sink.report_count(), 14);
}

#[tokio::test]
#[serial]
async fn test_subscriber_sees_clear_then_every_line() {
    let sink = EventSink::new();
    sink.report("left over from a previous run");
    let mut updates = sink.subscribe();
    let orchestrator = Orchestrator::new(test_config(), sink.clone());

    orchestrator.run_all_demos().await;

    assert!(matches!(updates.try_recv(), Ok(SinkUpdate::Cleared)));
    let mut seen = Vec::new();
    while let Ok(SinkUpdate::Appended(event)) = updates.try_recv() {
        seen.push(event.text);
    }
    assert_eq!(seen, EXPECTED.to_vec());
}
