//! MemoryStorage - in-memory storage backend for tests and simulation.
//!
//! Clones share the same units, so a test can hand one handle to a queue and
//! keep another to inspect what was persisted, or to build a second queue
//! against the same "flash" after a simulated reset.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ports::{RecordReader, RecordWriter, StorageBackend, StorageError};

#[derive(Debug, Default)]
struct MemoryStorageState {
    units: HashMap<String, Vec<u8>>,
    /// Number of times each unit was opened for writing.
    write_counts: HashMap<String, usize>,
    mounted: bool,
    fail_mount: bool,
    fail_reads: bool,
    fail_read_data: bool,
    fail_writes: bool,
}

/// In-memory storage backend.
///
/// Supports:
/// - Truncating writes, whole-unit reads
/// - Fault injection for mount, read and write opens
/// - Write counting, to observe write amplification
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryStorageState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a unit with raw bytes, as if written by an earlier boot.
    pub fn insert_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        self.state
            .borrow_mut()
            .units
            .insert(name.to_string(), bytes.into());
    }

    pub fn remove(&self, name: &str) {
        self.state.borrow_mut().units.remove(name);
    }

    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.state.borrow().units.get(name).cloned()
    }

    /// Unit contents as lines (without terminators), for assertions.
    pub fn lines(&self, name: &str) -> Option<Vec<String>> {
        self.contents(name).map(|bytes| {
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()
        })
    }

    pub fn write_count(&self, name: &str) -> usize {
        self.state
            .borrow()
            .write_counts
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    pub fn set_fail_mount(&self, fail: bool) {
        self.state.borrow_mut().fail_mount = fail;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    /// Opens succeed, but reading the opened unit fails.
    pub fn set_fail_read_data(&self, fail: bool) {
        self.state.borrow_mut().fail_read_data = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl StorageBackend for MemoryStorage {
    type Reader = MemoryReader;
    type Writer = MemoryWriter;

    fn mount(&mut self) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.fail_mount {
            return Err(StorageError::Unavailable("mount failed".to_string()));
        }
        state.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) {
        self.state.borrow_mut().mounted = false;
    }

    fn open_read(&mut self, name: &str) -> Result<MemoryReader, StorageError> {
        let state = self.state.borrow();
        if !state.mounted {
            return Err(StorageError::NotMounted);
        }
        if state.fail_reads {
            return Err(StorageError::Unavailable(format!("cannot open {name} for reading")));
        }
        let bytes = state
            .units
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        Ok(MemoryReader {
            bytes,
            fail: state.fail_read_data,
        })
    }

    fn open_write(&mut self, name: &str) -> Result<MemoryWriter, StorageError> {
        let mut state = self.state.borrow_mut();
        if !state.mounted {
            return Err(StorageError::NotMounted);
        }
        if state.fail_writes {
            return Err(StorageError::Unavailable(format!("cannot open {name} for writing")));
        }
        state.units.insert(name.to_string(), Vec::new());
        *state.write_counts.entry(name.to_string()).or_default() += 1;
        Ok(MemoryWriter {
            name: name.to_string(),
            state: Rc::clone(&self.state),
        })
    }
}

/// Snapshot of a unit taken at open time.
#[derive(Debug)]
pub struct MemoryReader {
    bytes: Vec<u8>,
    fail: bool,
}

impl RecordReader for MemoryReader {
    fn read_available(&mut self) -> Result<Vec<u8>, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("read failed".to_string()));
        }
        Ok(std::mem::take(&mut self.bytes))
    }

    fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Writes straight into the shared unit, like an unbuffered flash file.
#[derive(Debug)]
pub struct MemoryWriter {
    name: String,
    state: Rc<RefCell<MemoryStorageState>>,
}

impl RecordWriter for MemoryWriter {
    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        let unit = state.units.entry(self.name.clone()).or_default();
        unit.extend_from_slice(line.as_bytes());
        unit.push(b'\n');
        Ok(())
    }

    fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}
