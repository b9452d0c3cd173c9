//! Queue module: the engine, its run control, configuration and builder.

mod builder;
mod config;
mod control;
mod engine;

pub use builder::QueueBuilder;
pub use config::{DEFAULT_STORAGE_NAME, QueueConfig, validate_storage_name};
pub use control::RunControl;
pub use engine::PersistentQueue;
