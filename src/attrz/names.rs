//! Attribute name listings.
//!
//! Internally a listing is a plain sequence of names. The delimiter-joined string
//! (`owner:group`) only exists at the edges: when a listing is handed to a caller
//! buffer, or parsed back from one. An empty listing joins to an empty string and
//! parses back to an empty sequence.

use std::fmt;

pub const DELIMITER: char = ':';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrNames(Vec<String>);

impl AttrNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a joined listing. An empty string yields no names.
    pub fn parse(joined: &str) -> Self {
        if joined.is_empty() {
            return Self::new();
        }
        Self(joined.split(DELIMITER).map(str::to_string).collect())
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Names in lexical order, for stable display.
    pub fn sorted(mut self) -> Self {
        self.0.sort();
        self
    }

    /// Delimiter-joined form with no trailing delimiter.
    pub fn join(&self) -> String {
        let mut out = String::with_capacity(self.joined_len());
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            out.push_str(name);
        }
        out
    }

    /// Length in bytes of [`AttrNames::join`], without building it.
    pub fn joined_len(&self) -> usize {
        let names: usize = self.0.iter().map(String::len).sum();
        names + self.0.len().saturating_sub(1)
    }

    /// Copies as much of the joined listing as fits into `buf`.
    ///
    /// Returns the logical length of the full listing; a value larger than
    /// `buf.len()` means the copy was truncated.
    pub fn copy_into(&self, buf: &mut [u8]) -> usize {
        let joined = self.join();
        let n = joined.len().min(buf.len());
        buf[..n].copy_from_slice(&joined.as_bytes()[..n]);
        joined.len()
    }
}

impl fmt::Display for AttrNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl FromIterator<String> for AttrNames {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AttrNames {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrNames {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
