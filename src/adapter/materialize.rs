//! ## Materialize
//!
//! Creation of missing directories

use super::SmbAdapter;
use crate::client::Share;
use crate::fs::{FilesystemError, FilesystemResult};
use crate::utils::path as path_utils;

impl<S: Share> SmbAdapter<S> {
    /// Make sure the directory at the normalized `path` and all of its ancestors exist.
    ///
    /// Ancestors are walked up until an existing one is found, then the missing ones are created
    /// from the top down. Root always exists.
    pub(crate) fn ensure_directory(&self, path: &str) -> FilesystemResult<()> {
        let mut missing = Vec::new();
        let mut current = path;
        while !current.is_empty() && !self.entry_exists(current)? {
            missing.push(current);
            current = path_utils::dirname(current);
        }
        for dir in missing.into_iter().rev() {
            let location = self.prefixer.apply(dir);
            trace!("creating missing directory {}", location);
            self.share
                .mkdir(location.as_str())
                .map_err(|e| FilesystemError::UnableToCreateDirectory {
                    path: dir.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Any existing entry satisfies the directory check; a file in the way makes the following write fail
    fn entry_exists(&self, path: &str) -> FilesystemResult<bool> {
        self.share
            .stat(self.prefixer.apply(path).as_str())
            .map(|entry| entry.is_some())
            .map_err(|e| FilesystemError::UnableToCreateDirectory {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}
