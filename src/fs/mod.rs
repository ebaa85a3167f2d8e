//! # fs
//!
//! The storage abstraction exposed to callers: a filesystem adapter and the entities it returns

use std::io::Read;

mod attributes;
mod config;
mod error;
mod listing;
mod mime;

pub use attributes::{DirectoryAttributes, FileAttributes, StorageAttributes, Visibility};
pub use config::Config;
pub use error::{FilesystemError, FilesystemResult, MetadataKind};
pub use listing::DirectoryListing;
pub use mime::{ContentMimeTypeDetector, MimeTypeDetector};

/// A storage backend which can be used as a filesystem.
///
/// Paths are logical: relative to the adapter root, using `/` as separator.
pub trait FilesystemAdapter {
    /// Returns whether a file exists at `path`
    fn file_exists(&self, path: &str) -> FilesystemResult<bool>;

    /// Returns whether a directory exists at `path`
    fn directory_exists(&self, path: &str) -> FilesystemResult<bool>;

    /// Returns whether either a file or a directory exists at `path`
    fn has(&self, path: &str) -> FilesystemResult<bool> {
        Ok(self.file_exists(path)? || self.directory_exists(path)?)
    }

    /// Write `contents` to `path`, creating any missing parent directory
    fn write(&self, path: &str, contents: &[u8], config: &Config) -> FilesystemResult<()>;

    /// Write everything read from `contents` to `path`, creating any missing parent directory
    fn write_stream(
        &self,
        path: &str,
        contents: &mut dyn Read,
        config: &Config,
    ) -> FilesystemResult<()>;

    /// Read the whole file at `path`
    fn read(&self, path: &str) -> FilesystemResult<Vec<u8>>;

    /// Open the file at `path` for reading
    fn read_stream(&self, path: &str) -> FilesystemResult<Box<dyn Read + '_>>;

    /// Delete the file at `path`. Deleting a file which doesn't exist is not an error.
    fn delete(&self, path: &str) -> FilesystemResult<()>;

    /// Delete the directory at `path` and everything it contains
    fn delete_directory(&self, path: &str) -> FilesystemResult<()>;

    /// Create the directory at `path` and any missing parent
    fn create_directory(&self, path: &str, config: &Config) -> FilesystemResult<()>;

    fn set_visibility(&self, path: &str, visibility: Visibility) -> FilesystemResult<()>;

    fn visibility(&self, path: &str) -> FilesystemResult<StorageAttributes>;

    fn mime_type(&self, path: &str) -> FilesystemResult<FileAttributes>;

    fn last_modified(&self, path: &str) -> FilesystemResult<StorageAttributes>;

    /// Get file size. Fails with [`FilesystemError::UnexpectedDirectory`] if `path` is a directory
    fn file_size(&self, path: &str) -> FilesystemResult<FileAttributes>;

    /// List the entries in the directory at `path`; if `deep`, list sub directories too.
    ///
    /// Files come first, then entries are sorted by descending depth.
    fn list_contents(&self, path: &str, deep: bool) -> FilesystemResult<DirectoryListing>;

    /// Move `source` to `destination`, creating any missing destination parent
    fn mov(&self, source: &str, destination: &str, config: &Config) -> FilesystemResult<()>;

    fn copy(&self, source: &str, destination: &str, config: &Config) -> FilesystemResult<()>;
}
