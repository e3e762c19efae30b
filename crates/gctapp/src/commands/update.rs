use crate::clock::Clock;
use crate::commands::helpers::{take_todo, validate_id};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GctError, Result};
use crate::model::validate_description;
use crate::store::TodoRepository;

/// Replace the description of an existing todo. The done flag is untouched.
pub fn run<R: TodoRepository, C: Clock>(
    repo: &mut R,
    clock: &C,
    id: i64,
    description: &str,
) -> Result<CmdResult> {
    let id = validate_id(id)?;
    // Reject bad text before loading anything
    validate_description(description)?;

    let mut todo = take_todo(repo.find_all()?, id)?;
    todo.update_description(description, clock.now())?;

    let todo = repo
        .save(&[todo])?
        .into_iter()
        .next()
        .ok_or_else(|| GctError::configuration("repository returned empty result"))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Todo {} updated: {}",
        todo.id, todo.description
    )));
    Ok(result.with_affected_todos(vec![todo]))
}
