//! ## Config
//!
//! Per-operation options

use super::Visibility;

/// Options passed to write-like operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Visibility to apply to the written file
    pub visibility: Option<Visibility>,
}

impl Config {
    /// Construct `Config` with the provided visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}
