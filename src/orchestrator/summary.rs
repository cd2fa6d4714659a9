/*!
 * Run Summary
 * Per-mechanism statuses of one orchestrated run
 */

use crate::core::types::{DemoStatus, Mechanism};
use serde::Serialize;

/// Statuses in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    statuses: Vec<(Mechanism, DemoStatus)>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mechanism: Mechanism, status: DemoStatus) {
        self.statuses.push((mechanism, status));
    }

    pub fn statuses(&self) -> &[(Mechanism, DemoStatus)] {
        &self.statuses
    }

    pub fn all_completed(&self) -> bool {
        self.statuses.iter().all(|(_, status)| status.is_completed())
    }

    /// Mechanisms whose demo failed, in execution order
    pub fn failed(&self) -> Vec<Mechanism> {
        self.statuses
            .iter()
            .filter(|(_, status)| !status.is_completed())
            .map(|(mechanism, _)| *mechanism)
            .collect()
    }

    pub fn status_of(&self, mechanism: Mechanism) -> Option<DemoStatus> {
        self.statuses
            .iter()
            .find(|(m, _)| *m == mechanism)
            .map(|(_, status)| *status)
    }
}
