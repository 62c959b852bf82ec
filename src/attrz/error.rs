use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which part of the attribute layout was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Target,
    AttributeDirectory,
    Attribute,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Missing::Target => "target",
            Missing::AttributeDirectory => "attribute directory",
            Missing::Attribute => "attribute",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("No such {what}: {}", path.display())]
    NotFound { what: Missing, path: PathBuf },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Value of {size} bytes exceeds the maximum of {max} bytes")]
    SizeExceeded { size: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Value truncated: copied {copied} of {stored} bytes")]
    Truncated { copied: usize, stored: usize },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AttrError {
    pub fn not_found(what: Missing, path: impl Into<PathBuf>) -> Self {
        AttrError::NotFound {
            what,
            path: path.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        AttrError::InvalidArgument(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AttrError::NotFound { .. })
    }

    /// Numeric code reported at the entry-point surface.
    pub fn code(&self) -> ErrorCode {
        match self {
            AttrError::NotFound { .. } => ErrorCode::NotFound,
            AttrError::InvalidArgument(_) | AttrError::Config(_) => ErrorCode::InvalidArgument,
            AttrError::SizeExceeded { .. } => ErrorCode::SizeExceeded,
            AttrError::Io(_) => ErrorCode::Io,
            AttrError::Truncated { .. } => ErrorCode::Truncated,
        }
    }
}

/// Negated errno values returned by the entry points in [`crate::api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ErrorCode {
    NotFound = -2,
    Io = -5,
    SizeExceeded = -7,
    InvalidArgument = -22,
    Truncated = -34,
}

impl ErrorCode {
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(code: i64) -> Option<Self> {
        match code {
            -2 => Some(ErrorCode::NotFound),
            -5 => Some(ErrorCode::Io),
            -7 => Some(ErrorCode::SizeExceeded),
            -22 => Some(ErrorCode::InvalidArgument),
            -34 => Some(ErrorCode::Truncated),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AttrError>;
