use crate::commands::helpers::validate_id;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::TodoRepository;

/// Delete a todo. Every todo after it shifts down by one, so callers holding
/// IDs must refetch.
pub fn run<R: TodoRepository>(repo: &mut R, id: i64) -> Result<CmdResult> {
    let id = validate_id(id)?;
    repo.delete_by_id(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Todo {} deleted successfully",
        id
    )));
    Ok(result)
}
