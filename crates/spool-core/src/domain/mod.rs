//! Domain model (items, run state, drive reports).

pub mod item;
pub mod report;
pub mod state;

pub use item::Item;
pub use report::{DriveReport, QueueStatus};
pub use state::RunState;
