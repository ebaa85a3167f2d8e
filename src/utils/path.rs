//! ## path
//!
//! Logical path utilities

use crate::fs::{FilesystemError, FilesystemResult};

/// Logical path separator
pub const SEPARATOR: char = '/';

const SEPARATORS: [char; 2] = ['\\', '/'];

/// Normalize a user supplied path.
///
/// Backslashes become slashes, empty, whitespace-only and `.` segments are dropped, `..` pops the
/// previous segment. The result has neither leading nor trailing separators; root is `""`.
pub fn normalize(path: &str) -> FilesystemResult<String> {
    if path.chars().any(char::is_control) {
        return Err(FilesystemError::CorruptedPathDetected {
            path: path.to_string(),
        });
    }
    let path = path.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(SEPARATOR) {
        match part.trim() {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(FilesystemError::PathTraversalDetected { path });
                }
            }
            _ => parts.push(part),
        }
    }
    Ok(parts.join("/"))
}

/// Logical path of an entry reported by the share, once the prefix has been removed.
///
/// Unlike [`normalize`], names are kept exactly as the share reports them; whitespace-only names
/// are valid remote entries.
pub fn from_share(location: &str) -> FilesystemResult<String> {
    if location.chars().any(char::is_control) {
        return Err(FilesystemError::CorruptedPathDetected {
            path: location.to_string(),
        });
    }
    Ok(location
        .replace('\\', "/")
        .trim_matches(SEPARATOR)
        .to_string())
}

/// Parent of a normalized path; `""` for top-level entries
pub fn dirname(path: &str) -> &str {
    match path.rsplit_once(SEPARATOR) {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// Number of separators in `path`
pub fn depth(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}

/// Applies and removes the adapter root prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixer {
    prefix: String,
}

impl PathPrefixer {
    /// The prefix is stored with trailing separators trimmed and exactly one `/` appended
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: format!("{}{}", prefix.trim_end_matches(SEPARATORS), SEPARATOR),
        }
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Get the remote location for a logical path
    pub fn apply(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path.trim_start_matches(SEPARATORS))
    }

    /// Get the logical path for a remote location.
    ///
    /// `location` must start with the prefix; shorter locations resolve to root.
    pub fn remove<'a>(&self, location: &'a str) -> &'a str {
        location.get(self.prefix.len()..).unwrap_or_default()
    }
}

impl Default for PathPrefixer {
    fn default() -> Self {
        Self::new("/")
    }
}
