/*!
 * Semaphore Demo
 * Lock, simulated work, unlock
 */

use super::semaphore::NamedSemaphore;
use super::types::SemaphoreOutcome;
use crate::core::errors::DemoResult;
use crate::core::limits::{SEMAPHORE_INITIAL_PERMITS, SEMAPHORE_MAX_PERMITS};
use crate::core::types::Mechanism;
use crate::core::DebuggerConfig;
use crate::monitoring::EventSink;
use tracing::info;

/// Hold a fresh binary semaphore for `semaphore_hold`, logging both edges
///
/// "Unlocked" is only reported once the release succeeded.
pub async fn run_demo(config: &DebuggerConfig, sink: &EventSink) -> DemoResult<SemaphoreOutcome> {
    let tag = Mechanism::Semaphore.tag();
    let semaphore = NamedSemaphore::create(
        &NamedSemaphore::unique_name(),
        SEMAPHORE_INITIAL_PERMITS,
        SEMAPHORE_MAX_PERMITS,
    )?;

    let permit = semaphore.acquire(config.semaphore_timeout)?;
    sink.report(format!("{tag} Locked"));

    tokio::time::sleep(config.semaphore_hold).await;

    permit.release()?;
    sink.report(format!("{tag} Unlocked"));

    let value_after = semaphore.value()?;
    info!(name = semaphore.name(), value_after, "semaphore cycle complete");

    Ok(SemaphoreOutcome {
        name: semaphore.name().to_string(),
        value_after,
    })
}
