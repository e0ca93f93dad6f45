use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Directory that receives export snapshots.
///
/// Files are written through a temp file in the same directory and then
/// renamed over the target, so a reader never sees a half-written table.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if missing and probes that it is writable.
    pub fn ensure(&self) -> Result<(), PersistError> {
        if self.dir.exists() {
            let meta =
                fs::metadata(&self.dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(PersistError::OutputDir(format!(
                    "{} is not a directory",
                    self.dir.display()
                )));
            }
        } else {
            fs::create_dir_all(&self.dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        }
        NamedTempFile::new_in(&self.dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        Ok(())
    }

    pub fn write_atomic(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        self.ensure()?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    /// Deletes `path` if it exists. Returns whether anything was removed.
    pub fn remove(&self, path: &Path) -> Result<bool, PersistError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
