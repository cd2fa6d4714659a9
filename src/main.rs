/*!
 * IPC Debugger - Main Entry Point
 *
 * Without arguments: run every demonstration once and print the event log.
 * With `__ipc-child <role> ...`: act as a child process of a running debugger.
 */

use ipc_debugger::monitoring::SinkUpdate;
use ipc_debugger::process::usage_exit_code;
use ipc_debugger::{init_tracing, run_child, ChildRole, DebuggerConfig, EventSink, Orchestrator};
use std::process::ExitCode;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

/// Conventional exit status for termination by Ctrl+C
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match ChildRole::from_args(std::env::args_os().skip(1)) {
        Ok(Some(role)) => return run_child(role).await,
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "invalid child invocation");
            return usage_exit_code();
        }
    }

    let config = match DebuggerConfig::new().and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            return ExitCode::FAILURE;
        }
    };

    let sink = EventSink::new();
    let presenter = tokio::spawn(present(sink.subscribe()));
    let orchestrator = Orchestrator::new(config, sink);

    let summary = {
        let run = orchestrator.run_all_demos();
        tokio::pin!(run);

        tokio::select! {
            summary = &mut run => summary,
            _ = tokio::signal::ctrl_c() => {
                orchestrator.stop();
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        }
    };

    // Dropping the last sink handle closes the channel and lets the presenter finish
    drop(orchestrator);
    if let Err(e) = presenter.await {
        warn!(error = %e, "presenter task failed");
    }

    if summary.all_completed() {
        info!("all demonstrations completed");
        ExitCode::SUCCESS
    } else {
        warn!(failed = ?summary.failed(), "some demonstrations failed");
        ExitCode::FAILURE
    }
}

/// Print every appended event until the sink goes away
async fn present(mut updates: tokio::sync::broadcast::Receiver<SinkUpdate>) {
    loop {
        match updates.recv().await {
            Ok(SinkUpdate::Appended(event)) => println!("{}", event.render()),
            Ok(SinkUpdate::Cleared) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "presenter fell behind"),
            Err(RecvError::Closed) => break,
        }
    }
}
