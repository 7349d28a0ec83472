use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What a path looks like before we try to open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    /// Nothing exists at the path yet.
    Missing,
    /// An entry exists and is not marked read-only.
    Writable,
    /// An entry exists but cannot be written, or the path is empty.
    ReadOnly,
}

/// Probe `path` without opening it.
pub fn probe(path: &Path) -> PathStatus {
    if path.as_os_str().is_empty() {
        return PathStatus::ReadOnly;
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => PathStatus::ReadOnly,
        Ok(_) => PathStatus::Writable,
        Err(e) if e.kind() == io::ErrorKind::NotFound => PathStatus::Missing,
        Err(_) => PathStatus::ReadOnly,
    }
}

/// An append-mode log file with a byte ceiling.
///
/// A ceiling of zero disables truncation.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
    size_limit: u64,
}

impl FileSink {
    /// Open `path` for appending, creating the file if needed.
    ///
    /// Parent directories must already exist; see [`create_parent_dirs`].
    pub fn open(path: &Path, size_limit: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            size_limit,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    pub fn set_size_limit(&mut self, bytes: u64) {
        self.size_limit = bytes;
    }

    /// Current length of the backing file in bytes.
    pub fn size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// True when a ceiling is set and the file has grown past it.
    pub fn over_limit(&self) -> io::Result<bool> {
        if self.size_limit == 0 {
            return Ok(false);
        }
        Ok(self.size()? > self.size_limit)
    }

    /// Cut the file to zero bytes. Appends continue from the new end.
    pub fn truncate(&mut self) -> io::Result<()> {
        self.file.set_len(0)
    }

    /// Write all parts back to back, then flush.
    pub fn append(&mut self, parts: &[&str]) -> io::Result<()> {
        for part in parts {
            self.file.write_all(part.as_bytes())?;
        }
        self.file.flush()
    }
}

/// Create every missing directory above `path`.
///
/// Returns the directory that was ensured, if `path` has one.
pub fn create_parent_dirs(path: &Path) -> io::Result<Option<PathBuf>> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(Some(parent.to_path_buf()))
        }
        _ => Ok(None),
    }
}
