use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fs::FsService;
use crate::store::AttributeStore;
use std::path::Path;

pub fn run<F: FsService>(
    store: &AttributeStore<F>,
    target: &Path,
    name: &str,
    value: &[u8],
) -> Result<CmdResult> {
    let written = store.set(target, name, value)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Set {} on {} ({} bytes)",
        name,
        target.display(),
        written
    )));
    Ok(result)
}
