use serde::{Deserialize, Serialize};

use super::{Item, RunState};

/// What a single `drive()` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DriveReport {
    /// The queue was not armed; nothing happened.
    Idle,

    /// The queue drained; success callbacks fired.
    Completed { processed: usize },

    /// The action rejected `item`, which stays at the head.
    Failed { processed: usize, item: Item },

    /// The run was disarmed between items; no completion callbacks fired.
    Cancelled { processed: usize },
}

impl DriveReport {
    /// Items removed from the queue during this call.
    pub fn processed(&self) -> usize {
        match self {
            DriveReport::Idle => 0,
            DriveReport::Completed { processed }
            | DriveReport::Failed { processed, .. }
            | DriveReport::Cancelled { processed } => *processed,
        }
    }
}

/// Serializable snapshot of a queue, for status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub storage_name: String,
    pub state: RunState,
    pub len: usize,
    pub items: Vec<Item>,
}
