//! # Path Resolution
//!
//! Maps a target to the hidden directory holding its attributes:
//!
//! ```text
//! /tmp/foo.txt          target
//! /tmp/.foo.txt_attr/   attribute directory (sibling of the target)
//! /tmp/.foo.txt_attr/owner
//! /tmp/.foo.txt_attr/group
//! ```
//!
//! Files and directories resolve the same way. Every length is checked against
//! [`Limits`] before a path is built, so an oversized input is rejected with
//! `InvalidArgument` instead of being cut short.

use crate::config::Limits;
use crate::error::{AttrError, Result};
use crate::names::DELIMITER;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

pub const ATTR_DIR_PREFIX: &str = ".";
pub const ATTR_DIR_SUFFIX: &str = "_attr";

/// Path of the attribute directory for `target`: `<parent>/.<basename>_attr`.
///
/// The target must have a directory component; bare names and `/` are rejected.
pub fn attr_dir_path(target: &Path, limits: &Limits) -> Result<PathBuf> {
    validate_target(target, limits)?;

    let base = target
        .file_name()
        .ok_or_else(|| AttrError::invalid(format!("{} has no file name", target.display())))?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => {
            return Err(AttrError::invalid(format!(
                "{} has no parent directory",
                target.display()
            )))
        }
    };

    let mut dir_name = OsString::with_capacity(base.len() + 6);
    dir_name.push(ATTR_DIR_PREFIX);
    dir_name.push(base);
    dir_name.push(ATTR_DIR_SUFFIX);
    if dir_name.len() > limits.max_name_len {
        return Err(AttrError::invalid(format!(
            "attribute directory name for {} exceeds {} bytes",
            target.display(),
            limits.max_name_len
        )));
    }

    let dir = parent.join(dir_name);
    check_path_len(&dir, limits)?;
    Ok(dir)
}

/// The target a directory would hold attributes for, if its name has the
/// `.<basename>_attr` shape. Says nothing about whether that target exists.
pub fn attr_dir_owner(dir: &Path) -> Option<PathBuf> {
    let name = dir.file_name()?.to_str()?;
    let base = name
        .strip_prefix(ATTR_DIR_PREFIX)?
        .strip_suffix(ATTR_DIR_SUFFIX)?;
    if base.is_empty() {
        return None;
    }
    Some(dir.with_file_name(base))
}

/// Path of the file holding attribute `name` inside `attr_dir`.
pub fn attr_file_path(attr_dir: &Path, name: &str, limits: &Limits) -> Result<PathBuf> {
    validate_name(name, limits)?;
    let path = attr_dir.join(name);
    check_path_len(&path, limits)?;
    Ok(path)
}

/// Checks that `name` can be stored as a single file and listed unambiguously.
pub fn validate_name(name: &str, limits: &Limits) -> Result<()> {
    if name.is_empty() {
        return Err(AttrError::invalid("attribute name is empty"));
    }
    if name.len() > limits.max_name_len {
        return Err(AttrError::invalid(format!(
            "attribute name exceeds {} bytes",
            limits.max_name_len
        )));
    }
    if name == "." || name == ".." {
        return Err(AttrError::invalid(format!(
            "'{}' is not a valid attribute name",
            name
        )));
    }
    if let Some(bad) = name.chars().find(|c| *c == '/' || *c == '\0' || *c == DELIMITER) {
        return Err(AttrError::invalid(format!(
            "attribute name contains forbidden character {:?}",
            bad
        )));
    }
    Ok(())
}

/// Checks total and per-component length of a target path.
pub fn validate_target(target: &Path, limits: &Limits) -> Result<()> {
    if target.as_os_str().is_empty() {
        return Err(AttrError::invalid("target path is empty"));
    }
    check_path_len(target, limits)?;
    for component in target.components() {
        if let Component::Normal(part) = component {
            if part.len() > limits.max_name_len {
                return Err(AttrError::invalid(format!(
                    "path component of {} exceeds {} bytes",
                    target.display(),
                    limits.max_name_len
                )));
            }
        }
    }
    Ok(())
}

fn check_path_len(path: &Path, limits: &Limits) -> Result<()> {
    if path.as_os_str().len() > limits.max_path_len {
        return Err(AttrError::invalid(format!(
            "path exceeds {} bytes",
            limits.max_path_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits::default()
    }

    #[test]
    fn derives_hidden_sibling_for_file() {
        let dir = attr_dir_path(Path::new("/tmp/foo.txt"), &limits()).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/.foo.txt_attr"));
    }

    #[test]
    fn derives_hidden_sibling_for_directory() {
        let dir = attr_dir_path(Path::new("/home/alice/projects"), &limits()).unwrap();
        assert_eq!(dir, PathBuf::from("/home/alice/.projects_attr"));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        let dir = attr_dir_path(Path::new("/srv/data/"), &limits()).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/.data_attr"));
    }

    #[test]
    fn target_at_root_level() {
        let dir = attr_dir_path(Path::new("/etc"), &limits()).unwrap();
        assert_eq!(dir, PathBuf::from("/.etc_attr"));
    }

    #[test]
    fn relative_target_with_directory_is_accepted() {
        let dir = attr_dir_path(Path::new("docs/readme.md"), &limits()).unwrap();
        assert_eq!(dir, PathBuf::from("docs/.readme.md_attr"));
    }

    #[test]
    fn bare_name_is_rejected() {
        let err = attr_dir_path(Path::new("foo.txt"), &limits()).unwrap_err();
        assert!(matches!(err, AttrError::InvalidArgument(_)));
    }

    #[test]
    fn root_is_rejected() {
        assert!(attr_dir_path(Path::new("/"), &limits()).is_err());
        assert!(attr_dir_path(Path::new(""), &limits()).is_err());
    }

    #[test]
    fn long_basename_is_rejected_once_decorated() {
        let limits = Limits {
            max_name_len: 16,
            ..Limits::default()
        };
        // 10 bytes of base fit, but ".<base>_attr" is 16 bytes and still fits.
        assert!(attr_dir_path(Path::new("/t/abcdefghij"), &limits).is_ok());
        // 11 bytes of base makes the decorated name 17 bytes.
        assert!(attr_dir_path(Path::new("/t/abcdefghijk"), &limits).is_err());
    }

    #[test]
    fn long_path_is_rejected() {
        let limits = Limits {
            max_path_len: 12,
            ..Limits::default()
        };
        assert!(attr_dir_path(Path::new("/tmp/a"), &limits).is_ok());
        assert!(attr_dir_path(Path::new("/tmp/abcdefgh"), &limits).is_err());
    }

    #[test]
    fn names_are_validated() {
        let l = limits();
        assert!(validate_name("owner", &l).is_ok());
        assert!(validate_name("user.mime_type", &l).is_ok());
        assert!(validate_name("", &l).is_err());
        assert!(validate_name(".", &l).is_err());
        assert!(validate_name("..", &l).is_err());
        assert!(validate_name("a/b", &l).is_err());
        assert!(validate_name("a:b", &l).is_err());
        assert!(validate_name("a\0b", &l).is_err());
        assert!(validate_name(&"x".repeat(256), &l).is_err());
        assert!(validate_name(&"x".repeat(255), &l).is_ok());
    }

    #[test]
    fn owner_of_attribute_directory() {
        assert_eq!(
            attr_dir_owner(Path::new("/tmp/.foo.txt_attr")),
            Some(PathBuf::from("/tmp/foo.txt"))
        );
        assert_eq!(
            attr_dir_owner(Path::new("/home/alice/.projects_attr")),
            Some(PathBuf::from("/home/alice/projects"))
        );
        assert_eq!(attr_dir_owner(Path::new("/tmp/foo.txt")), None);
        assert_eq!(attr_dir_owner(Path::new("/tmp/.cache")), None);
        assert_eq!(attr_dir_owner(Path::new("/tmp/._attr")), None);
        assert_eq!(attr_dir_owner(Path::new("/")), None);
    }

    #[test]
    fn attr_file_lives_inside_dir() {
        let path = attr_file_path(Path::new("/tmp/.foo_attr"), "owner", &limits()).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/.foo_attr/owner"));
    }
}
