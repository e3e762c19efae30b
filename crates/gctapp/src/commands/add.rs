use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GctError, Result};
use crate::model::Todo;
use crate::store::TodoRepository;

pub fn run<R: TodoRepository, C: Clock>(
    repo: &mut R,
    clock: &C,
    description: &str,
) -> Result<CmdResult> {
    let todo = Todo::new(description, clock.now())?;
    let todo = repo
        .save(&[todo])?
        .into_iter()
        .next()
        .ok_or_else(|| GctError::configuration("repository returned empty result"))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Todo added successfully: {} (ID: {})",
        todo.description, todo.id
    )));
    Ok(result.with_affected_todos(vec![todo]))
}
