use super::backend::StorageBackend;
use super::TodoRepository;
use crate::error::{ErrorKind, GctError, Result, TODO_NOT_FOUND};
use crate::model::Todo;
use std::path::PathBuf;
use tracing::debug;

/// Repository logic shared by every backend: ID allocation, replacement
/// semantics and resequencing on delete.
pub struct TodoStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> TodoStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Where the collection is persisted.
    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// The stored collection sorted by ID. Duplicate IDs (only possible in a
    /// hand-edited file) fail the load so no operation writes them back.
    fn load(&self) -> Result<Vec<Todo>> {
        let mut todos = self.backend.load()?.unwrap_or_default();
        todos.sort_by_key(|t| t.id);
        if let Some(pair) = todos.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(GctError::new(
                ErrorKind::Json,
                format!("duplicate todo ID {} in data file", pair[0].id),
            ));
        }
        Ok(todos)
    }
}

impl<B: StorageBackend> TodoRepository for TodoStore<B> {
    fn find_all(&self) -> Result<Vec<Todo>> {
        self.load()
    }

    fn save(&mut self, todos: &[Todo]) -> Result<Vec<Todo>> {
        if todos.is_empty() {
            return Ok(Vec::new());
        }

        let mut collection = self.load()?;
        let mut last_id = collection.last().map_or(0, |t| t.id);
        let mut saved = Vec::with_capacity(todos.len());

        // Merge in memory first; nothing is written unless every input applies
        for todo in todos {
            let mut todo = todo.clone();
            if todo.is_new() {
                last_id = last_id.checked_add(1).ok_or_else(|| {
                    GctError::new(
                        ErrorKind::Json,
                        format!("no todo ID left after {} in data file", last_id),
                    )
                })?;
                todo.id = last_id;
                todo.validate()?;
                collection.push(todo.clone());
            } else {
                todo.validate()?;
                let slot = collection
                    .iter_mut()
                    .find(|existing| existing.id == todo.id)
                    .ok_or(TODO_NOT_FOUND)?;
                *slot = todo.clone();
            }
            saved.push(todo);
        }

        collection.sort_by_key(|t| t.id);
        self.backend.store(&collection)?;
        debug!(saved = saved.len(), total = collection.len(), "saved todos");

        Ok(saved)
    }

    fn delete_by_id(&mut self, id: u64) -> Result<()> {
        let mut collection = self.load()?;
        let position = collection
            .iter()
            .position(|t| t.id == id)
            .ok_or(TODO_NOT_FOUND)?;
        collection.remove(position);

        // Resequence: survivors are already in ID order and become 1..N
        for (index, todo) in collection.iter_mut().enumerate() {
            todo.id = index as u64 + 1;
        }

        self.backend.store(&collection)?;
        debug!(deleted = id, remaining = collection.len(), "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{is_file_system, is_invalid_input, is_json, EMPTY_DESCRIPTION};
    use crate::store::mem_backend::MemBackend;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn fresh(description: &str) -> Todo {
        Todo::new(description, t0()).unwrap()
    }

    fn existing(id: u64, description: &str) -> Todo {
        let mut todo = fresh(description);
        todo.id = id;
        todo
    }

    fn make_store() -> TodoStore<MemBackend> {
        TodoStore::with_backend(MemBackend::new())
    }

    fn ids(todos: &[Todo]) -> Vec<u64> {
        todos.iter().map(|t| t.id).collect()
    }

    fn descriptions(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.description.as_str()).collect()
    }

    // --- find_all ---

    #[test]
    fn find_all_on_missing_collection_is_empty() {
        let store = make_store();
        assert!(store.find_all().unwrap().is_empty());
        assert_eq!(store.backend().store_count(), 0);
    }

    #[test]
    fn find_all_sorts_by_id() {
        let store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(3, "c"),
            existing(1, "a"),
            existing(2, "b"),
        ]));
        assert_eq!(ids(&store.find_all().unwrap()), vec![1, 2, 3]);
    }

    // --- save ---

    #[test]
    fn save_empty_input_does_no_io() {
        let mut store = make_store();
        assert!(store.save(&[]).unwrap().is_empty());
        assert_eq!(store.backend().load_count(), 0);
        assert_eq!(store.backend().store_count(), 0);
        assert_eq!(store.backend().stored(), None);
    }

    #[test]
    fn save_into_empty_collection_assigns_one_to_k() {
        let mut store = make_store();
        let saved = store
            .save(&[fresh("a"), fresh("b"), fresh("c")])
            .unwrap();

        assert_eq!(ids(&saved), vec![1, 2, 3]);
        assert_eq!(descriptions(&saved), vec!["a", "b", "c"]);
        assert_eq!(ids(&store.find_all().unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn new_ids_continue_after_max_not_count() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(1, "a"),
            existing(7, "b"),
        ]));
        let saved = store.save(&[fresh("c")]).unwrap();
        assert_eq!(saved[0].id, 8);
    }

    #[test]
    fn save_returns_inputs_in_input_order_not_collection() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(1, "a"),
            existing(2, "b"),
        ]));
        let mut updated = existing(2, "b2");
        updated.updated_at = t0() + Duration::seconds(1);

        let saved = store.save(&[fresh("new"), updated]).unwrap();
        assert_eq!(ids(&saved), vec![3, 2]);
        assert_eq!(descriptions(&saved), vec!["new", "b2"]);
    }

    #[test]
    fn id_space_exhaustion_is_an_error_not_a_wrap() {
        let mut store =
            TodoStore::with_backend(MemBackend::seeded(vec![existing(u64::MAX, "last")]));

        let err = store.save(&[fresh("one too many")]).unwrap_err();
        assert!(is_json(&err));
        assert_eq!(store.backend().store_count(), 0);

        // Updating the record at the ceiling still works
        let mut updated = existing(u64::MAX, "renamed");
        updated.updated_at = t0() + Duration::seconds(1);
        store.save(&[updated]).unwrap();
        assert_eq!(store.find_all().unwrap()[0].description, "renamed");
    }

    #[test]
    fn duplicate_ids_fail_every_operation_without_writing() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(1, "a"),
            existing(2, "b"),
            existing(1, "c"),
        ]));

        let err = store.find_all().unwrap_err();
        assert!(is_json(&err));
        assert_eq!(err.message(), "duplicate todo ID 1 in data file");
        assert!(is_json(&store.save(&[fresh("d")]).unwrap_err()));
        assert!(is_json(&store.delete_by_id(2).unwrap_err()));
        assert_eq!(store.backend().store_count(), 0);
    }

    #[test]
    fn save_update_replaces_whole_record() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![existing(1, "a")]));
        let mut updated = existing(1, "replaced");
        updated.done = true;
        updated.updated_at = t0() + Duration::minutes(1);

        store.save(&[updated.clone()]).unwrap();
        assert_eq!(store.find_all().unwrap(), vec![updated]);
    }

    #[test]
    fn save_update_of_unknown_id_is_not_found_and_writes_nothing() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![existing(1, "a")]));
        let err = store.save(&[fresh("ok"), existing(9, "ghost")]).unwrap_err();

        assert_eq!(err, TODO_NOT_FOUND);
        assert_eq!(store.backend().store_count(), 0);
        assert_eq!(ids(&store.find_all().unwrap()), vec![1]);
    }

    #[test]
    fn save_rejects_invalid_todo_without_writing() {
        let mut store = make_store();
        let mut bad = fresh("x");
        bad.description = "   ".to_string();

        let err = store.save(&[bad]).unwrap_err();
        assert_eq!(err, EMPTY_DESCRIPTION);
        assert!(is_invalid_input(&err));
        assert_eq!(store.backend().stored(), None);
    }

    #[test]
    fn save_writes_sorted_collection() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(5, "e"),
            existing(2, "b"),
        ]));
        store.save(&[fresh("f")]).unwrap();

        let stored = store.backend().stored().unwrap();
        assert_eq!(ids(&stored), vec![2, 5, 6]);
    }

    #[test]
    fn save_surfaces_write_errors() {
        let mut store = make_store();
        store.backend().set_simulate_write_error(true);

        let err = store.save(&[fresh("x")]).unwrap_err();
        assert!(is_file_system(&err));
        assert_eq!(store.backend().stored(), None);
    }

    #[test]
    fn saved_timestamps_are_ordered() {
        let mut store = make_store();
        let saved = store.save(&[fresh("x")]).unwrap();
        for todo in saved {
            assert!(todo.updated_at >= todo.created_at);
            assert!(todo.created_at.timestamp() > 0);
        }
    }

    // --- delete_by_id ---

    #[test]
    fn delete_resequences_survivors() {
        let mut store = make_store();
        store
            .save(&[fresh("A"), fresh("B"), fresh("C")])
            .unwrap();

        store.delete_by_id(2).unwrap();

        let todos = store.find_all().unwrap();
        assert_eq!(ids(&todos), vec![1, 2]);
        assert_eq!(descriptions(&todos), vec!["A", "C"]);
    }

    #[test]
    fn delete_sorts_unordered_ids_before_renumbering() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![
            existing(1, "X"),
            existing(5, "Y"),
            existing(3, "Z"),
        ]));

        store.delete_by_id(5).unwrap();

        let stored = store.backend().stored().unwrap();
        assert_eq!(ids(&stored), vec![1, 2]);
        assert_eq!(descriptions(&stored), vec!["X", "Z"]);
    }

    #[test]
    fn delete_last_todo_leaves_empty_collection() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![existing(1, "only")]));
        store.delete_by_id(1).unwrap();
        assert_eq!(store.backend().stored(), Some(Vec::new()));
    }

    #[test]
    fn delete_unknown_id_is_not_found_and_writes_nothing() {
        let mut store = TodoStore::with_backend(MemBackend::seeded(vec![existing(1, "a")]));
        assert_eq!(store.delete_by_id(4).unwrap_err(), TODO_NOT_FOUND);
        assert_eq!(store.backend().store_count(), 0);
    }

    #[test]
    fn delete_on_missing_collection_is_not_found() {
        let mut store = make_store();
        assert_eq!(store.delete_by_id(1).unwrap_err(), TODO_NOT_FOUND);
        assert_eq!(store.backend().stored(), None);
    }

    #[test]
    fn ids_are_dense_after_repeated_deletes() {
        let mut store = make_store();
        let batch: Vec<Todo> = (0..6).map(|i| fresh(&format!("t{}", i))).collect();
        store.save(&batch).unwrap();

        store.delete_by_id(1).unwrap();
        store.delete_by_id(3).unwrap();
        store.delete_by_id(4).unwrap();

        let todos = store.find_all().unwrap();
        assert_eq!(ids(&todos), vec![1, 2, 3]);
        assert_eq!(descriptions(&todos), vec!["t1", "t2", "t4"]);
    }
}
