/*!
 * Shared Memory Demo
 * Write a payload through a named mapping, read it back, release the name
 */

use super::segment::SharedRegion;
use super::types::{ShmError, ShmOutcome};
use crate::core::errors::DemoResult;
use crate::core::types::Mechanism;
use crate::core::DebuggerConfig;
use crate::monitoring::EventSink;
use tracing::info;

/// Round-trip the configured payload through a fresh region sized to fit it
///
/// The region is unlinked before this returns, whatever the outcome.
pub fn run_demo(config: &DebuggerConfig, sink: &EventSink) -> DemoResult<ShmOutcome> {
    let payload = config.shm_payload.as_bytes();
    let region_name = SharedRegion::unique_name();

    let content = {
        let mut region = SharedRegion::create(&region_name, payload.len())?;
        region.write(0, payload)?;
        let bytes = region.read(0, payload.len())?;
        String::from_utf8(bytes).map_err(ShmError::from)?
    };

    info!(name = %region_name, size = payload.len(), "shared memory round trip complete");
    sink.report(format!("{} Written: {}", Mechanism::SharedMemory.tag(), content));

    Ok(ShmOutcome {
        region_name,
        size: payload.len(),
        content,
    })
}
