#![forbid(unsafe_code)]

//! Block-granular I/O backend used to load and save reference-block state.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use blockref_types::Result;
use parking_lot::Mutex;

/// Abstracts the underlying block device so the engine can be driven by a
/// real file in production and an in-memory buffer in tests.
pub trait BlockIo: Send + Sync {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;
    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()>;
    fn len(&self) -> Result<u64>;
    fn sync_all(&self) -> Result<()>;
}

pub struct StdFileIo {
    file: Mutex<File>,
}

impl StdFileIo {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn as_arc(self) -> Arc<dyn BlockIo> {
        Arc::new(self)
    }
}

impl BlockIo for StdFileIo {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(buf)?;
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.file.lock().metadata()?.len())
    }

    fn sync_all(&self) -> Result<()> {
        self.file.lock().sync_all()?;
        Ok(())
    }
}

/// A growable in-memory backing store, used by unit and integration tests
/// that don't want to touch the filesystem.
pub struct MemoryIo {
    data: Mutex<Vec<u8>>,
}

impl MemoryIo {
    pub fn new(initial_len: usize) -> Self {
        Self {
            data: Mutex::new(vec![0u8; initial_len]),
        }
    }

    pub fn as_arc(self) -> Arc<dyn BlockIo> {
        Arc::new(self)
    }
}

impl BlockIo for MemoryIo {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let data = self.data.lock();
        let start = offset as usize;
        let end = start + buf.len();
        if end > data.len() {
            return Err(blockref_types::BlockRefError::Corruption(
                "read past end of backing store",
            ));
        }
        buf.copy_from_slice(&data[start..end]);
        Ok(())
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()> {
        let mut data = self.data.lock();
        let start = offset as usize;
        let end = start + buf.len();
        if end > data.len() {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.data.lock().len() as u64)
    }

    fn sync_all(&self) -> Result<()> {
        Ok(())
    }
}
