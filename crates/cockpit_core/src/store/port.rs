//! Persistence port for the tracking document.
//!
//! # Responsibility
//! - Define the minimal read/write contract the tracker persists through.
//! - Define the transport error shared by every adapter.
//!
//! # Invariants
//! - Adapters move opaque serialized documents; they never interpret them.
//! - `read` returns `Ok(None)` when no document was ever written.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistResult<T> = Result<T, PersistError>;

/// Transport/encoding failure raised by a persistence adapter.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    Encode(serde_json::Error),
    /// Adapter refused the operation (used by test doubles).
    Unavailable(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tracking document: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<tempfile::PersistError> for PersistError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Storage contract for the single serialized tracking document.
pub trait DocumentPort {
    /// Short adapter name used in log events.
    fn kind(&self) -> &'static str;
    fn read(&self) -> PersistResult<Option<String>>;
    fn write(&self, document: &str) -> PersistResult<()>;
}

impl<P: DocumentPort + ?Sized> DocumentPort for Box<P> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn read(&self) -> PersistResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, document: &str) -> PersistResult<()> {
        (**self).write(document)
    }
}
