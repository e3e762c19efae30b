use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::TodoRepository;

pub fn run<R: TodoRepository>(repo: &R) -> Result<CmdResult> {
    let todos = repo.find_all()?;
    Ok(CmdResult::default().with_listed_todos(todos))
}
