/*!
 * Shared Memory Demo Tests
 */

use super::test_config;
use ipc_debugger::ipc::shm::{self, SharedRegion};
use ipc_debugger::EventSink;
use pretty_assertions::assert_eq;

#[test]
fn test_shm_demo_round_trip_and_release() {
    let config = test_config();
    let sink = EventSink::new();

    let outcome = shm::run_demo(&config, &sink).unwrap();

    assert_eq!(outcome.content, "Shared Memory Data");
    assert_eq!(outcome.size, "Shared Memory Data".len());
    assert!(!SharedRegion::exists(&outcome.region_name));
    assert_eq!(sink.texts(), vec!["[SHM] Written: Shared Memory Data"]);
}

#[test]
fn test_shm_demo_repeats_without_collision() {
    let config = test_config();
    let sink = EventSink::new();

    let first = shm::run_demo(&config, &sink).unwrap();
    let second = shm::run_demo(&config, &sink).unwrap();

    assert_ne!(first.region_name, second.region_name);
    assert!(!SharedRegion::exists(&first.region_name));
    assert!(!SharedRegion::exists(&second.region_name));
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_region_name_lives_as_long_as_region() {
    let name = SharedRegion::unique_name();
    let mut writer = SharedRegion::create(&name, 16).unwrap();
    writer.write(4, b"visible").unwrap();

    assert!(SharedRegion::exists(&name));
    assert_eq!(writer.read(4, 7).unwrap(), b"visible");
    drop(writer);
    assert!(!SharedRegion::exists(&name));
}
