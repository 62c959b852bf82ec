use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fs::FsService;
use crate::store::AttributeStore;
use std::path::Path;

pub fn run<F: FsService>(
    store: &AttributeStore<F>,
    target: &Path,
    name: &str,
) -> Result<CmdResult> {
    store.remove(target, name)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} from {}",
        name,
        target.display()
    )));
    Ok(result)
}

pub fn run_all<F: FsService>(store: &AttributeStore<F>, target: &Path) -> Result<CmdResult> {
    let removed = store.remove_all(target)?;
    let mut result = CmdResult::default();
    let noun = if removed == 1 { "attribute" } else { "attributes" };
    result.add_message(CmdMessage::success(format!(
        "Removed {} {} from {}",
        removed,
        noun,
        target.display()
    )));
    Ok(result)
}
