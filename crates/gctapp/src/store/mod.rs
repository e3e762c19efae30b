//! # Storage Layer
//!
//! This module owns the on-disk representation of the todo list. The
//! [`TodoRepository`] trait is the only way the rest of the library observes or
//! changes persisted state.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: the "how". Reads and writes the whole
//!   collection (a JSON file, or memory in tests). Knows nothing about IDs.
//! - [`todo_store::TodoStore`]: the "what". ID allocation, update semantics,
//!   validation and resequencing, written once for every backend.
//!
//! ## Storage Format
//!
//! A single UTF-8 JSON file holding an array of todos, pretty printed with two
//! space indentation and sorted by ascending `id`:
//!
//! ```text
//! ~/.local/share/gct/
//! └── todos.json
//! ```
//!
//! A missing file is the empty collection. Reading never creates it.
//!
//! Writes go to a temporary file next to the target and are renamed over it.
//! A symlinked data file is followed, so the link survives and its target is
//! replaced; the target's permission bits are copied onto the new file.
//! A file holding duplicate IDs is rejected on load as a JSON error.
//!
//! ## ID Policy
//!
//! - **Allocation**: a todo saved with `id == 0` receives `max(id) + 1`
//!   (1 for an empty collection). Several new todos in one `save` call get
//!   consecutive IDs in input order.
//! - **Resequencing**: after a delete, survivors are sorted by their previous ID
//!   and renumbered `1..N`. IDs stay short and gap-free, but they are **not
//!   stable**: any ID held across a delete must be refetched.
//!
//! ## Consistency
//!
//! Every public call is a full load-mutate-store cycle with no file handle kept
//! open in between. Nothing coordinates concurrent writers; gct assumes a single
//! interactive user.
//!
//! ## Implementations
//!
//! - [`JsonRepository`]: production, backed by [`fs_backend::FsBackend`].
//! - [`InMemoryRepository`]: tests, backed by [`mem_backend::MemBackend`].

use crate::error::Result;
use crate::model::Todo;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod todo_store;

pub use todo_store::TodoStore;

pub type JsonRepository = TodoStore<fs_backend::FsBackend>;
pub type InMemoryRepository = TodoStore<mem_backend::MemBackend>;

/// Abstract interface for todo persistence.
pub trait TodoRepository {
    /// All todos, ascending by ID. Empty when nothing has been stored yet.
    fn find_all(&self) -> Result<Vec<Todo>>;

    /// Create (`id == 0`) or replace (`id > 0`) todos.
    ///
    /// Returns the inputs with their IDs filled in, in input order.
    fn save(&mut self, todos: &[Todo]) -> Result<Vec<Todo>>;

    /// Remove a todo and renumber the survivors `1..N`.
    fn delete_by_id(&mut self, id: u64) -> Result<()>;
}
