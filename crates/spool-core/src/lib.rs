//! spool-core
//!
//! A small durable FIFO of string items for firmware-style hosts. Items are
//! mirrored to a storage backend on every change, so the queue survives a
//! reset; a host tick drives a user action over them, head first.
//!
//! # Modules
//! - **domain**: `Item`, `RunState`, `DriveReport`, `QueueStatus`
//! - **ports**: `StorageBackend`, `LineSink`, `Action`, `EventHandler`
//! - **mirror**: the line-delimited durable record
//! - **queue**: `PersistentQueue`, `QueueBuilder`, `QueueConfig`, `RunControl`
//! - **impls**: `MemoryStorage`, `DirStorage`, console sinks

pub mod domain;
pub mod error;
pub mod impls;
pub mod mirror;
pub mod ports;
pub mod queue;

pub use domain::{DriveReport, Item, QueueStatus, RunState};
pub use error::SpoolError;
pub use queue::{PersistentQueue, QueueBuilder, QueueConfig, RunControl};
