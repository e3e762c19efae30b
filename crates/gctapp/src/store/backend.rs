use crate::error::Result;
use crate::model::Todo;
use std::path::PathBuf;

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while TodoStore handles the "what" (ID allocation, resequencing).
pub trait StorageBackend {
    /// Load the whole collection in stored order.
    /// Returns Ok(None) if nothing has been stored yet (missing file).
    /// Returns Err only on actual I/O or decode errors.
    fn load(&self) -> Result<Option<Vec<Todo>>>;

    /// Replace the stored collection with `todos`, written in the given order.
    fn store(&self, todos: &[Todo]) -> Result<()>;

    /// Where the collection lives. A real path for FsBackend, a virtual one for MemBackend.
    fn location(&self) -> PathBuf;
}
