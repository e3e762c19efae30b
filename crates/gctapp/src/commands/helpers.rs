use crate::error::{Result, INVALID_ID, TODO_NOT_FOUND};
use crate::model::Todo;

/// Turn a user supplied ID into a repository ID. Zero and negatives are
/// rejected before the repository is touched.
pub fn validate_id(id: i64) -> Result<u64> {
    if id <= 0 {
        return Err(INVALID_ID);
    }
    Ok(id as u64)
}

/// Take the todo with `id` out of a freshly loaded collection.
pub fn take_todo(todos: Vec<Todo>, id: u64) -> Result<Todo> {
    todos
        .into_iter()
        .find(|t| t.id == id)
        .ok_or(TODO_NOT_FOUND)
}
