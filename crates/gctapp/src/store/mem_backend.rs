use super::backend::StorageBackend;
use crate::error::{GctError, Result};
use crate::model::Todo;
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since gct is single-threaded, which
/// lets the `StorageBackend` trait take `&self` everywhere. `None` plays the
/// role of a missing data file.
#[derive(Default)]
pub struct MemBackend {
    todos: RefCell<Option<Vec<Todo>>>,
    simulate_write_error: Cell<bool>,
    loads: Cell<usize>,
    stores: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that starts out holding `todos` exactly as given, unsorted
    /// and with whatever IDs they carry.
    pub fn seeded(todos: Vec<Todo>) -> Self {
        let backend = Self::default();
        *backend.todos.borrow_mut() = Some(todos);
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Snapshot of what is stored, `None` if nothing ever was.
    pub fn stored(&self) -> Option<Vec<Todo>> {
        self.todos.borrow().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    pub fn store_count(&self) -> usize {
        self.stores.get()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<Vec<Todo>>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.todos.borrow().clone())
    }

    fn store(&self, todos: &[Todo]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(GctError::file_system(
                "failed to write data file memory://todos.json",
                io::Error::new(io::ErrorKind::Other, "simulated write error"),
            ));
        }
        self.stores.set(self.stores.get() + 1);
        *self.todos.borrow_mut() = Some(todos.to_vec());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://todos.json")
    }
}
