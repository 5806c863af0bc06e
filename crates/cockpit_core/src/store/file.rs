//! JSON file document adapter.
//!
//! # Invariants
//! - Writes are atomic: the document goes to a sibling temp file that is
//!   then renamed over the target, so a crash never leaves a torn file.
//! - A missing file reads as "no document", not as an error.

use super::port::{DocumentPort, PersistResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct JsonFilePort {
    path: PathBuf,
}

impl JsonFilePort {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl DocumentPort for JsonFilePort {
    fn kind(&self) -> &'static str {
        "json_file"
    }

    fn read(&self) -> PersistResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, document: &str) -> PersistResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut staged = NamedTempFile::new_in(&dir)?;
        staged.write_all(document.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        Ok(())
    }
}
