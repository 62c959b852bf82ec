use crate::error::{AttrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const DEFAULT_MAX_NAME_LEN: usize = 255;
pub const DEFAULT_MAX_VALUE_SIZE: usize = 64 * 1024;
pub const DEFAULT_MAX_PATH_LEN: usize = 4096;
pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Keys accepted by [`AttrzConfig::get`] and [`AttrzConfig::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "max-name-len",
    "max-value-size",
    "max-path-len",
    "dir-mode",
    "file-mode",
];

/// Hard caps and creation modes applied by the attribute store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest attribute name or path component, in bytes.
    pub max_name_len: usize,
    /// Largest attribute value, in bytes.
    pub max_value_size: usize,
    /// Longest target or derived path, in bytes.
    pub max_path_len: usize,
    pub dir_mode: u32,
    pub file_mode: u32,
}

impl Default for Limits {
    fn default() -> Self {
        AttrzConfig::default().limits()
    }
}

/// Configuration for attrz, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttrzConfig {
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    #[serde(default = "default_max_value_size")]
    pub max_value_size: usize,

    #[serde(default = "default_max_path_len")]
    pub max_path_len: usize,

    /// Mode for newly created attribute directories.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,

    /// Mode for newly created attribute files.
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
}

fn default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

fn default_max_value_size() -> usize {
    DEFAULT_MAX_VALUE_SIZE
}

fn default_max_path_len() -> usize {
    DEFAULT_MAX_PATH_LEN
}

fn default_dir_mode() -> u32 {
    DEFAULT_DIR_MODE
}

fn default_file_mode() -> u32 {
    DEFAULT_FILE_MODE
}

impl Default for AttrzConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            max_path_len: DEFAULT_MAX_PATH_LEN,
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl AttrzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AttrError::Io)?;
        let config: AttrzConfig = serde_json::from_str(&content).map_err(AttrError::Config)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AttrError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AttrError::Config)?;
        fs::write(config_path, content).map_err(AttrError::Io)?;
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_name_len: self.max_name_len,
            max_value_size: self.max_value_size,
            max_path_len: self.max_path_len,
            dir_mode: self.dir_mode,
            file_mode: self.file_mode,
        }
    }

    /// Display value for a key. Modes are shown in octal.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "max-name-len" => Some(self.max_name_len.to_string()),
            "max-value-size" => Some(self.max_value_size.to_string()),
            "max-path-len" => Some(self.max_path_len.to_string()),
            "dir-mode" => Some(format!("{:o}", self.dir_mode)),
            "file-mode" => Some(format!("{:o}", self.file_mode)),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "max-name-len" => self.max_name_len = parse_size(key, value)?,
            "max-value-size" => self.max_value_size = parse_size(key, value)?,
            "max-path-len" => self.max_path_len = parse_size(key, value)?,
            "dir-mode" => self.dir_mode = parse_mode(key, value)?,
            "file-mode" => self.file_mode = parse_mode(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_size(key: &str, value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("{} must be a positive integer, got '{}'", key, value)),
        Ok(n) => Ok(n),
    }
}

fn parse_mode(key: &str, value: &str) -> std::result::Result<u32, String> {
    let digits = value.trim_start_matches("0o");
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(format!("{} must be an octal mode like 755, got '{}'", key, value)),
    }
}
