use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fs::FsService;
use crate::store::AttributeStore;
use std::path::Path;

/// Lists attribute names, sorted for display.
pub fn run<F: FsService>(store: &AttributeStore<F>, target: &Path) -> Result<CmdResult> {
    let names = store.list_names(target)?.sorted();
    let mut result = CmdResult::default();
    if names.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No attributes on {}",
            target.display()
        )));
    }
    Ok(result.with_names(names))
}
