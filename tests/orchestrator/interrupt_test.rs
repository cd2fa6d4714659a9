/*!
 * Interrupt Tests
 * Ctrl+C mid-run exits 130 without leaving OS objects behind
 */

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

fn leftover_semaphores(pid: u32) -> Vec<String> {
    let prefix = format!("sem.ipc-debugger-sem-{}-", pid);
    std::fs::read_dir("/dev/shm")
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

#[test]
#[serial]
fn test_interrupt_during_semaphore_hold_leaves_no_semaphore() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ipc-debugger"))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let pid = child.id();

    // Kept open until the child exits so late prints never hit a closed pipe
    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();
    let mut seen = Vec::new();
    for line in lines.by_ref() {
        let line = line.unwrap();
        let locked = line.ends_with("[SEMAPHORE] Locked");
        seen.push(line);
        if locked {
            break;
        }
    }
    assert!(
        seen.iter().any(|l| l.ends_with("[SEMAPHORE] Locked")),
        "run ended early: {:?}",
        seen
    );

    kill(Pid::from_raw(pid as i32), Signal::SIGINT).unwrap();
    let status = child.wait().unwrap();
    drop(lines);

    assert_eq!(status.code(), Some(130));
    assert_eq!(leftover_semaphores(pid), Vec::<String>::new());
}
