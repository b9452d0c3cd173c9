//! Run state machine for the queue engine.

use serde::{Deserialize, Serialize};

/// Run state of a queue.
///
/// State transitions:
/// - Idle -> Running (`run()`)
/// - Running -> Succeeded (drive emptied the queue)
/// - Running -> Failed (the action rejected the head item)
/// - any -> Idle (`cancel()`)
/// - Succeeded / Failed -> Running (`run()` again)
///
/// Only `Running` is armed; every other state is a disarmed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Disarmed, never ran or cancelled.
    #[default]
    Idle,

    /// Armed: the next `drive()` processes items.
    Running,

    /// Last run drained the queue.
    Succeeded,

    /// Last run stopped on a failed item.
    Failed,
}

impl RunState {
    pub fn is_armed(self) -> bool {
        matches!(self, RunState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_running_is_armed() {
        assert!(RunState::Running.is_armed());
        assert!(!RunState::Idle.is_armed());
        assert!(!RunState::Succeeded.is_armed());
        assert!(!RunState::Failed.is_armed());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&RunState::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}
