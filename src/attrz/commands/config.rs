use crate::commands::{CmdMessage, CmdResult};
use crate::config::AttrzConfig;
use crate::error::Result;
use std::path::Path;

/// What `attrz config` was asked to do.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or updates the limits file in `dir`.
///
/// Unknown keys and unparsable values are reported as error messages and leave
/// the file untouched; only I/O and JSON failures are returned as errors.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = AttrzConfig::load(dir)?;
    let message = match action {
        ConfigAction::ShowAll => return Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(val) => CmdMessage::info(val),
            None => CmdMessage::error(format!("Unknown config key: {}", key)),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Err(e) => CmdMessage::error(e),
            Ok(()) => {
                config.save(dir)?;
                let shown = config.get(&key).unwrap_or(value);
                CmdMessage::success(format!("{} = {} (limits apply to the next run)", key, shown))
            }
        },
    };
    let mut result = CmdResult::default().with_config(config);
    result.add_message(message);
    Ok(result)
}
