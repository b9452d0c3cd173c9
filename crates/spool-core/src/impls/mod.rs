//! Impls - storage backends and consoles.
//!
//! # Included
//! - **MemoryStorage**: shared in-memory units with fault injection
//! - **DirStorage**: one file per unit under a directory
//! - **TracingConsole / StdoutConsole / MemoryConsole**: line sinks

pub mod console;
pub mod dir;
pub mod memory;

pub use self::console::{MemoryConsole, StdoutConsole, TracingConsole};
pub use self::dir::DirStorage;
pub use self::memory::MemoryStorage;
