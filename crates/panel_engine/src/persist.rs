use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::types::{PersistError, SavedFile};

/// Destination for finished documents.
pub trait FileSink: Send + Sync {
    fn save(
        &self,
        filename: &str,
        content: &str,
        mime_type: &'static str,
    ) -> Result<SavedFile, PersistError>;
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))
}

/// Writes each document into one directory via temp file + rename, so a
/// reader never observes a half-written file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FileSink for DirectorySink {
    fn save(
        &self,
        filename: &str,
        content: &str,
        mime_type: &'static str,
    ) -> Result<SavedFile, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;

        Ok(SavedFile {
            path: target,
            filename: filename.to_string(),
            mime_type,
            bytes: content.len() as u64,
        })
    }
}
