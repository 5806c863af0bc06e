//! In-memory document adapter.
//!
//! Clones share the same backing cell, so a test can keep a handle while the
//! tracker owns another.

use super::port::{DocumentPort, PersistError, PersistResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryPort {
    document: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port pre-seeded with a raw document, valid or not.
    pub fn with_document(document: impl Into<String>) -> Self {
        let port = Self::default();
        *port.document.borrow_mut() = Some(document.into());
        port
    }

    /// Makes every following `write` fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Last successfully written document.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl DocumentPort for MemoryPort {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn read(&self) -> PersistResult<Option<String>> {
        Ok(self.document.borrow().clone())
    }

    fn write(&self, document: &str) -> PersistResult<()> {
        if self.fail_writes.get() {
            return Err(PersistError::Unavailable(
                "memory port configured to reject writes".to_string(),
            ));
        }
        *self.document.borrow_mut() = Some(document.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
