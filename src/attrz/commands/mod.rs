//! Business logic behind each CLI command.
//!
//! Commands take a store and plain arguments and return a [`CmdResult`]; they
//! never print. Rendering is left to the binary.

use crate::config::AttrzConfig;
use crate::names::AttrNames;

pub mod config;
pub mod get;
pub mod helpers;
pub mod list;
pub mod remove;
pub mod set;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub value: Option<Vec<u8>>,
    pub names: Option<AttrNames>,
    pub config: Option<AttrzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_names(mut self, names: AttrNames) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_config(mut self, config: AttrzConfig) -> Self {
        self.config = Some(config);
        self
    }
}
