use std::collections::HashSet;

use rand::Rng;
use spool_core::{Item, RunControl};
use spool_core::ports::Action;

/// Stand-in for the real network send: logs each item and fails on demand.
pub struct SimulatedSender {
    fail_on: HashSet<String>,
    fail_rate: f64,
    /// Stop the run after this many sends (cooperative cancel).
    limit: Option<usize>,
    sent: usize,
    control: RunControl,
}

impl SimulatedSender {
    pub fn new(
        fail_on: impl IntoIterator<Item = String>,
        fail_rate: f64,
        limit: Option<usize>,
        control: RunControl,
    ) -> Self {
        Self {
            fail_on: fail_on.into_iter().collect(),
            fail_rate,
            limit,
            sent: 0,
            control,
        }
    }
}

impl Action for SimulatedSender {
    fn execute(&mut self, item: &Item) -> bool {
        if self.fail_on.contains(item.as_str()) {
            tracing::warn!(%item, "send rejected");
            return false;
        }
        if self.fail_rate > 0.0 && rand::thread_rng().gen_bool(self.fail_rate) {
            tracing::warn!(%item, "send failed (simulated)");
            return false;
        }

        self.sent += 1;
        tracing::info!(%item, sent = self.sent, "sent");
        if self.limit.is_some_and(|limit| self.sent >= limit) {
            tracing::info!(sent = self.sent, "send limit reached, cancelling run");
            self.control.cancel();
        }
        true
    }
}
