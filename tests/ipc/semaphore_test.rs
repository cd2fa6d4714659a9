/*!
 * Semaphore Demo Tests
 */

use super::test_config;
use ipc_debugger::ipc::sem::{self, NamedSemaphore};
use ipc_debugger::{EventSink, TimeoutPolicy};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_semaphore_demo_lock_unlock_order() {
    let config = test_config();
    let sink = EventSink::new();

    let start = Instant::now();
    let outcome = sem::run_demo(&config, &sink).await.unwrap();

    assert!(start.elapsed() >= config.semaphore_hold);
    assert_eq!(sink.texts(), vec!["[SEMAPHORE] Locked", "[SEMAPHORE] Unlocked"]);
    assert_eq!(outcome.value_after, 1);
    assert!(!NamedSemaphore::exists(&outcome.name));

    let events = sink.events();
    assert!(events[1].timestamp >= events[0].timestamp);
}

#[test]
fn test_waiter_blocks_until_release() {
    let semaphore = NamedSemaphore::create(&NamedSemaphore::unique_name(), 1, 1).unwrap();
    let held = semaphore.acquire(TimeoutPolicy::default_lock()).unwrap();

    std::thread::scope(|scope| {
        let waiter = scope.spawn(|| {
            let start = Instant::now();
            let permit = semaphore
                .acquire(TimeoutPolicy::Lock(Duration::from_secs(5)))
                .unwrap();
            let waited = start.elapsed();
            permit.release().unwrap();
            waited
        });

        std::thread::sleep(Duration::from_millis(100));
        held.release().unwrap();

        let waited = waiter.join().unwrap();
        assert!(waited >= Duration::from_millis(80), "waited only {:?}", waited);
    });

    assert_eq!(semaphore.value().unwrap(), 1);
}
