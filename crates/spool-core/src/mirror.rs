//! Durable mirror: the queue as a line-delimited record on a storage backend.
//!
//! Every save rewrites the whole record. Queues are small, and a full rewrite
//! never leaves a half-updated record behind.

use crate::domain::Item;
use crate::error::SpoolError;
use crate::ports::{RecordReader, RecordWriter, StorageBackend, StorageError};

pub struct DurableMirror<S> {
    backend: S,
    name: String,
}

impl<S: StorageBackend> DurableMirror<S> {
    pub fn new(backend: S, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn mount(&mut self) -> Result<(), SpoolError> {
        self.backend.mount()?;
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.backend.unmount();
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Rewrite the record with `items`, in order.
    pub fn save<'a, I>(&mut self, items: I) -> Result<(), SpoolError>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut writer = self.backend.open_write(&self.name)?;
        for item in items {
            writer.append_line(item.as_str())?;
        }
        writer.close()?;
        Ok(())
    }

    /// Read the record back.
    ///
    /// A record that cannot be opened is an empty queue: on first boot there
    /// is nothing to load.
    pub fn load(&mut self) -> Vec<Item> {
        let mut reader = match self.backend.open_read(&self.name) {
            Ok(reader) => reader,
            Err(StorageError::NotFound(_)) => {
                tracing::debug!(storage = %self.name, "no queue record yet");
                return Vec::new();
            }
            Err(e) => {
                tracing::debug!(storage = %self.name, error = %e, "queue record not readable");
                return Vec::new();
            }
        };

        let bytes = match reader.read_available() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(storage = %self.name, error = %e, "reading queue record failed");
                Vec::new()
            }
        };
        if let Err(e) = reader.close() {
            tracing::debug!(storage = %self.name, error = %e, "closing queue record failed");
        }

        parse_record(&bytes)
    }
}

/// Split a record into items. Lines may end in `\n` or `\r\n`; blank lines
/// and a missing final terminator are tolerated. Lines that are not valid
/// items (a `\r` inside the token) are dropped.
pub fn parse_record(bytes: &[u8]) -> Vec<Item> {
    String::from_utf8_lossy(bytes)
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .filter_map(|line| match Item::new(line) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed record line");
                None
            }
        })
        .collect()
}
