use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::fs::FsService;
use crate::store::AttributeStore;
use std::path::Path;

/// Reads attribute `name`, limited to `max` bytes when given.
pub fn run<F: FsService>(
    store: &AttributeStore<F>,
    target: &Path,
    name: &str,
    max: Option<usize>,
) -> Result<CmdResult> {
    let Some(max) = max else {
        let value = store.get(target, name)?;
        return Ok(CmdResult::default().with_value(value));
    };

    let mut buf = vec![0u8; max];
    let transfer = store.get_into(target, name, &mut buf)?;
    buf.truncate(transfer.copied);

    let mut result = CmdResult::default().with_value(buf);
    if transfer.is_truncated() {
        result.add_message(CmdMessage::warning(format!(
            "Value truncated: showing {} of {} bytes",
            transfer.copied, transfer.stored
        )));
    }
    Ok(result)
}
