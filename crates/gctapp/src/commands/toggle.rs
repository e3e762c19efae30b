use crate::clock::Clock;
use crate::commands::helpers::{take_todo, validate_id};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GctError, Result};
use crate::store::TodoRepository;

pub fn run<R: TodoRepository, C: Clock>(repo: &mut R, clock: &C, id: i64) -> Result<CmdResult> {
    let id = validate_id(id)?;
    let mut todo = take_todo(repo.find_all()?, id)?;
    todo.toggle(clock.now());

    let todo = repo
        .save(&[todo])?
        .into_iter()
        .next()
        .ok_or_else(|| GctError::configuration("repository returned empty result"))?;

    let state = if todo.done { "complete" } else { "incomplete" };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Todo {} marked as {}: {}",
        todo.id, state, todo.description
    )));
    Ok(result.with_affected_todos(vec![todo]))
}
