//! DirStorage - storage units as files in one directory.
//!
//! The host-side stand-in for a flash file system: each storage unit is a
//! regular file named after the unit.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::ports::{RecordReader, RecordWriter, StorageBackend, StorageError};

#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
    mounted: bool,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mounted: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn ensure_mounted(&self) -> Result<(), StorageError> {
        if self.mounted {
            Ok(())
        } else {
            Err(StorageError::NotMounted)
        }
    }
}

impl StorageBackend for DirStorage {
    type Reader = FileReader;
    type Writer = FileWriter;

    fn mount(&mut self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }

    fn open_read(&mut self, name: &str) -> Result<FileReader, StorageError> {
        self.ensure_mounted()?;
        match File::open(self.path_of(name)) {
            Ok(file) => Ok(FileReader { file }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn open_write(&mut self, name: &str) -> Result<FileWriter, StorageError> {
        self.ensure_mounted()?;
        let file = File::create(self.path_of(name))?;
        Ok(FileWriter {
            inner: BufWriter::new(file),
        })
    }
}

#[derive(Debug)]
pub struct FileReader {
    file: File,
}

impl RecordReader for FileReader {
    fn read_available(&mut self) -> Result<Vec<u8>, StorageError> {
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileWriter {
    inner: BufWriter<File>,
}

impl RecordWriter for FileWriter {
    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Flush and fsync, so a closed unit survives power loss.
    fn close(self) -> Result<(), StorageError> {
        let file = self.inner.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}
