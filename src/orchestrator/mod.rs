/*!
 * Orchestrator
 *
 * Runs the four demonstrations in a fixed order, one at a time, funnelling
 * every outcome into the event sink. A failing demo becomes a log line and
 * never stops the sequence.
 */

pub mod summary;

pub use summary::RunSummary;

use crate::core::errors::DemoResult;
use crate::core::limits::{COMPLETION_BANNER, START_BANNER};
use crate::core::types::{DemoStatus, Mechanism};
use crate::core::DebuggerConfig;
use crate::ipc::{pipe, sem, shm, socket};
use crate::monitoring::{DemoSpan, EventSink};
use crate::process::{ChildLauncher, ChildRegistry};
use tracing::{info, warn, Instrument};

/// Sequential driver for all demonstrations
#[derive(Debug)]
pub struct Orchestrator {
    config: DebuggerConfig,
    sink: EventSink,
    launcher: ChildLauncher,
}

impl Orchestrator {
    pub fn new(config: DebuggerConfig, sink: EventSink) -> Self {
        let launcher = ChildLauncher::new(config.child_program());
        Self {
            config,
            sink,
            launcher,
        }
    }

    /// Children currently alive on behalf of this orchestrator
    pub fn registry(&self) -> &ChildRegistry {
        self.launcher.registry()
    }

    /// Abrupt stop: SIGKILL every live child, returns how many were signalled
    ///
    /// Does not wait for anything. The caller is expected to exit.
    pub fn stop(&self) -> usize {
        let killed = self.registry().kill_all();
        warn!(killed, "stop requested, children killed");
        killed
    }

    /// Clear the log, then run every demo between the two banners
    pub async fn run_all_demos(&self) -> RunSummary {
        self.sink.clear();
        self.sink.report(START_BANNER);
        info!("run started");

        let mut summary = RunSummary::new();
        for mechanism in Mechanism::SEQUENCE {
            let status = match mechanism {
                Mechanism::Pipe => self.run_pipe_demo().await,
                Mechanism::SharedMemory => self.run_shared_memory_demo(),
                Mechanism::Semaphore => self.run_semaphore_demo().await,
                Mechanism::Socket => self.run_socket_demo().await,
            };
            summary.record(mechanism, status);
        }

        self.sink.report(COMPLETION_BANNER);
        info!(failed = ?summary.failed(), "run finished");
        summary
    }

    pub async fn run_pipe_demo(&self) -> DemoStatus {
        let demo = DemoSpan::new(Mechanism::Pipe);
        let result = pipe::run_demo(&self.config, &self.launcher, &self.sink)
            .instrument(demo.span().clone())
            .await;
        self.settle(&demo, Mechanism::Pipe, result)
    }

    pub fn run_shared_memory_demo(&self) -> DemoStatus {
        let demo = DemoSpan::new(Mechanism::SharedMemory);
        let result = demo
            .span()
            .in_scope(|| shm::run_demo(&self.config, &self.sink));
        self.settle(&demo, Mechanism::SharedMemory, result)
    }

    pub async fn run_semaphore_demo(&self) -> DemoStatus {
        let demo = DemoSpan::new(Mechanism::Semaphore);
        let result = sem::run_demo(&self.config, &self.sink)
            .instrument(demo.span().clone())
            .await;
        self.settle(&demo, Mechanism::Semaphore, result)
    }

    pub async fn run_socket_demo(&self) -> DemoStatus {
        let demo = DemoSpan::new(Mechanism::Socket);
        let result = socket::run_demo(&self.config, &self.launcher, &self.sink)
            .instrument(demo.span().clone())
            .await;
        self.settle(&demo, Mechanism::Socket, result)
    }

    /// Turn a demo result into a status, logging failures
    fn settle<T>(&self, demo: &DemoSpan, mechanism: Mechanism, result: DemoResult<T>) -> DemoStatus {
        match result {
            Ok(_) => {
                demo.record_result(true);
                DemoStatus::Completed
            }
            Err(e) => {
                demo.record_error(&e);
                warn!(trace_id = demo.trace_id(), %mechanism, error = %e, "demo failed");
                self.sink.report(format!("{} Failed: {}", mechanism.tag(), e));
                DemoStatus::Failed
            }
        }
    }
}
