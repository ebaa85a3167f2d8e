//! ## Walk
//!
//! Directory tree listing

use std::cmp::Reverse;

use super::{metadata, SmbAdapter};
use crate::client::Share;
use crate::fs::{
    DirectoryListing, FilesystemError, FilesystemResult, MetadataKind, StorageAttributes,
};
use crate::utils::path as path_utils;

impl<S: Share> SmbAdapter<S> {
    /// List the entries of the directory at the normalized `path`.
    ///
    /// With `deep`, sub directories are visited depth-first in pre-order. The result is sorted by
    /// [`sort_listing`].
    pub(crate) fn walk(&self, path: &str, deep: bool) -> FilesystemResult<DirectoryListing> {
        let location = self.prefixer.apply(path);
        let target = self
            .share
            .stat(location.as_str())
            .map_err(|e| FilesystemError::metadata(path, MetadataKind::Generic, e))?
            .ok_or_else(|| {
                FilesystemError::metadata(path, MetadataKind::Generic, "no such file or directory")
            })?;
        if !target.is_dir() {
            debug!("{} is not a directory; nothing to list", location);
            return Ok(DirectoryListing::empty());
        }
        let mut listing = Vec::new();
        let mut pending = vec![location];
        while let Some(dir) = pending.pop() {
            trace!("listing entries at {}", dir);
            let entries =
                self.share
                    .dir(dir.as_str())
                    .map_err(|e| FilesystemError::UnableToListContents {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })?;
            let mut children = Vec::new();
            for entry in entries {
                if deep && entry.is_dir() {
                    children.push(entry.path.clone());
                }
                listing.push(metadata::storage_attributes(&entry, &self.prefixer)?);
            }
            // reversed, so the first child is the next one popped
            pending.extend(children.into_iter().rev());
        }
        sort_listing(&mut listing);
        Ok(DirectoryListing::new(listing))
    }
}

/// Stable sort: files before directories, then deeper paths first
pub(crate) fn sort_listing(listing: &mut [StorageAttributes]) {
    listing.sort_by_key(|attrs| (attrs.is_dir(), Reverse(path_utils::depth(attrs.path()))));
}
