//! ## Metadata
//!
//! Conversion of share entries into storage attributes

use crate::client::ShareEntry;
use crate::fs::{
    DirectoryAttributes, FileAttributes, FilesystemResult, StorageAttributes, Visibility,
};
use crate::utils::path::{self as path_utils, PathPrefixer};

/// Convert a `ShareEntry` into `StorageAttributes`, with its path relative to the adapter root
pub fn storage_attributes(
    entry: &ShareEntry,
    prefixer: &PathPrefixer,
) -> FilesystemResult<StorageAttributes> {
    let path = path_utils::from_share(prefixer.remove(entry.path.as_str()))?;
    Ok(if entry.is_dir() {
        DirectoryAttributes::new(path)
            .last_modified(entry.modified)
            .into()
    } else {
        FileAttributes::new(path)
            .size(entry.size)
            .visibility(Visibility::from_hidden(entry.is_hidden()))
            .last_modified(entry.modified)
            .into()
    })
}
