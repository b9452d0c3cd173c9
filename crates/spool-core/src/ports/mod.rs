//! Ports - the seams between the queue engine and the outside world.
//!
//! - `storage`: the durable byte store (flash, disk, memory)
//! - `console`: the line sink used for dumps and diagnostics
//! - `action`: the per-item action and run-event listeners

pub mod action;
pub mod console;
pub mod storage;

pub use self::action::{Action, EventHandler};
pub use self::console::LineSink;
pub use self::storage::{RecordReader, RecordWriter, StorageBackend, StorageError};
