//! Storage port - the byte store behind the durable mirror.
//!
//! A backend holds named storage units (flash files on a device, plain files
//! on a host, a map in tests). The mirror only ever rewrites a whole unit or
//! reads a whole unit back.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is not mounted")]
    NotMounted,

    #[error("storage unit {0:?} does not exist")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A mountable store of named storage units.
///
/// # Design
/// - `mount` runs once when the queue is constructed, `unmount` on teardown.
/// - Handles returned by `open_read` / `open_write` are scoped: the mirror
///   closes them before returning, never holds them across calls.
/// - `open_write` truncates. A unit is always rewritten in full.
pub trait StorageBackend {
    type Reader: RecordReader;
    type Writer: RecordWriter;

    fn mount(&mut self) -> Result<(), StorageError>;

    fn unmount(&mut self) {}

    /// Open an existing unit. A missing unit is `StorageError::NotFound`.
    fn open_read(&mut self, name: &str) -> Result<Self::Reader, StorageError>;

    /// Create or truncate a unit for writing.
    fn open_write(&mut self, name: &str) -> Result<Self::Writer, StorageError>;
}

pub trait RecordReader {
    /// Read every byte still available in the unit.
    fn read_available(&mut self) -> Result<Vec<u8>, StorageError>;

    fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}

pub trait RecordWriter {
    /// Append `line` followed by a single `'\n'`.
    fn append_line(&mut self, line: &str) -> Result<(), StorageError>;

    fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}
