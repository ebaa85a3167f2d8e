//! # adapter
//!
//! Filesystem adapter over a remote share

use std::io::{self, Read, Write};

use crate::client::{DosMode, Share};
use crate::fs::{
    Config, ContentMimeTypeDetector, DirectoryListing, FileAttributes, FilesystemAdapter,
    FilesystemError, FilesystemResult, MetadataKind, MimeTypeDetector, StorageAttributes,
    Visibility,
};
use crate::utils::path::{self as path_utils, PathPrefixer};

mod materialize;
mod metadata;
mod walk;

/// Adapter configuration
pub struct AdapterConfig {
    prefix: String,
    mime_type_detector: Option<Box<dyn MimeTypeDetector>>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            prefix: String::from("/"),
            mime_type_detector: None,
        }
    }
}

impl AdapterConfig {
    /// Set the root prefix every path is resolved against on the share
    pub fn prefix<S: AsRef<str>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.as_ref().to_string();
        self
    }

    /// Replace the default mime type detector
    pub fn mime_type_detector<D: MimeTypeDetector + 'static>(mut self, detector: D) -> Self {
        self.mime_type_detector = Some(Box::new(detector));
        self
    }
}

/// Filesystem adapter for a remote SMB share
pub struct SmbAdapter<S: Share> {
    share: S,
    prefixer: PathPrefixer,
    mime_type_detector: Box<dyn MimeTypeDetector>,
}

impl<S: Share> SmbAdapter<S> {
    /// Instantiate a new `SmbAdapter` rooted at `/`
    pub fn new(share: S) -> Self {
        Self::with_config(share, AdapterConfig::default())
    }

    pub fn with_config(share: S, config: AdapterConfig) -> Self {
        Self {
            share,
            prefixer: PathPrefixer::new(config.prefix.as_str()),
            mime_type_detector: config
                .mime_type_detector
                .unwrap_or_else(|| Box::new(ContentMimeTypeDetector)),
        }
    }

    /// Return a reference to the inner share client
    pub fn share(&self) -> &S {
        &self.share
    }

    /// Consume the adapter, returning the share client
    pub fn into_share(self) -> S {
        self.share
    }

    /// Root prefix, with exactly one trailing separator
    pub fn prefix(&self) -> &str {
        self.prefixer.prefix()
    }

    // -- private

    fn location(&self, path: &str) -> String {
        self.prefixer.apply(path)
    }

    fn get_metadata(&self, path: &str, kind: MetadataKind) -> FilesystemResult<StorageAttributes> {
        let location = self.location(path);
        trace!("get metadata for {}", location);
        match self.share.stat(location.as_str()) {
            Ok(Some(entry)) => metadata::storage_attributes(&entry, &self.prefixer),
            Ok(None) => Err(FilesystemError::metadata(
                path,
                kind,
                "no such file or directory",
            )),
            Err(err) => Err(FilesystemError::metadata(path, kind, err)),
        }
    }

    fn write_from_reader(
        &self,
        path: &str,
        contents: &mut dyn Read,
        config: &Config,
    ) -> FilesystemResult<()> {
        let write_err = |reason: String| FilesystemError::UnableToWriteFile {
            path: path.to_string(),
            reason,
        };
        self.ensure_directory(path_utils::dirname(path))?;
        let location = self.location(path);
        trace!("writing file at {}", location);
        let mut stream = self
            .share
            .write(location.as_str())
            .map_err(|e| write_err(e.to_string()))?;
        // visibility is applied on the opened stream, before contents are written
        if let Some(visibility) = config.visibility {
            self.set_visibility(path, visibility)?;
        }
        io::copy(contents, &mut stream).map_err(|e| write_err(e.to_string()))?;
        stream.flush().map_err(|e| write_err(e.to_string()))
    }

    fn stat_exists(&self, path: &str) -> FilesystemResult<Option<bool>> {
        let path = path_utils::normalize(path)?;
        let location = self.location(path.as_str());
        trace!("checking if {} exists...", location);
        self.share
            .stat(location.as_str())
            .map(|entry| entry.map(|e| e.is_dir()))
            .map_err(|e| FilesystemError::UnableToCheckExistence {
                path,
                reason: e.to_string(),
            })
    }
}

impl<S: Share> FilesystemAdapter for SmbAdapter<S> {
    fn file_exists(&self, path: &str) -> FilesystemResult<bool> {
        Ok(self.stat_exists(path)? == Some(false))
    }

    fn directory_exists(&self, path: &str) -> FilesystemResult<bool> {
        Ok(self.stat_exists(path)? == Some(true))
    }

    fn write(&self, path: &str, contents: &[u8], config: &Config) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        let mut reader = contents;
        self.write_from_reader(path.as_str(), &mut reader, config)
    }

    fn write_stream(
        &self,
        path: &str,
        contents: &mut dyn Read,
        config: &Config,
    ) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        self.write_from_reader(path.as_str(), contents, config)
    }

    fn read(&self, path: &str) -> FilesystemResult<Vec<u8>> {
        let path = path_utils::normalize(path)?;
        let mut stream = self.read_stream(path.as_str())?;
        let mut contents = Vec::new();
        stream
            .read_to_end(&mut contents)
            .map_err(|e| FilesystemError::UnableToReadFile {
                path,
                reason: e.to_string(),
            })?;
        Ok(contents)
    }

    fn read_stream(&self, path: &str) -> FilesystemResult<Box<dyn Read + '_>> {
        let path = path_utils::normalize(path)?;
        let read_err = |reason: String| FilesystemError::UnableToReadFile {
            path: path.clone(),
            reason,
        };
        let location = self.location(path.as_str());
        trace!("opening file at {} for read", location);
        match self.share.stat(location.as_str()) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(read_err("no such file or directory".to_string())),
            Err(err) => return Err(read_err(err.to_string())),
        }
        self.share
            .read(location.as_str())
            .map_err(|e| read_err(e.to_string()))
    }

    fn delete(&self, path: &str) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        if self.get_metadata(path.as_str(), MetadataKind::Generic).is_err() {
            debug!("{} does not exist; nothing to delete", path);
            return Ok(());
        }
        let location = self.location(path.as_str());
        trace!("removing file {}", location);
        self.share
            .del(location.as_str())
            .map_err(|e| FilesystemError::UnableToDeleteFile {
                path,
                reason: e.to_string(),
            })
    }

    fn delete_directory(&self, path: &str) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        let delete_err = |reason: String| FilesystemError::UnableToDeleteDirectory {
            path: path.clone(),
            reason,
        };
        let contents = self
            .walk(path.as_str(), true)
            .map_err(|e| delete_err(e.to_string()))?;
        // files come first, then directories from the deepest one
        for entry in contents {
            let location = self.location(entry.path());
            let result = if entry.is_dir() {
                trace!("removing directory at {}", location);
                self.share.rmdir(location.as_str())
            } else {
                trace!("removing file {}", location);
                self.share.del(location.as_str())
            };
            result.map_err(|e| delete_err(format!("{}: {}", entry.path(), e)))?;
        }
        let location = self.location(path.as_str());
        trace!("removing directory at {}", location);
        self.share
            .rmdir(location.as_str())
            .map_err(|e| delete_err(e.to_string()))
    }

    fn create_directory(&self, path: &str, _config: &Config) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        self.ensure_directory(path.as_str())
    }

    fn set_visibility(&self, path: &str, visibility: Visibility) -> FilesystemResult<()> {
        let path = path_utils::normalize(path)?;
        if let Err(err) = self.get_metadata(path.as_str(), MetadataKind::Visibility) {
            return Err(FilesystemError::UnableToSetVisibility {
                path,
                reason: err.to_string(),
            });
        }
        let location = self.location(path.as_str());
        debug!("setting visibility {:?} for {}", visibility, location);
        self.share
            .set_mode(location.as_str(), DosMode::from(visibility))
            .map_err(|e| FilesystemError::UnableToSetVisibility {
                path,
                reason: e.to_string(),
            })
    }

    fn visibility(&self, path: &str) -> FilesystemResult<StorageAttributes> {
        let path = path_utils::normalize(path)?;
        self.get_metadata(path.as_str(), MetadataKind::Visibility)
    }

    fn mime_type(&self, path: &str) -> FilesystemResult<FileAttributes> {
        let path = path_utils::normalize(path)?;
        let mut contents = Vec::new();
        self.read_stream(path.as_str())
            .and_then(|mut stream| {
                stream
                    .read_to_end(&mut contents)
                    .map_err(|e| FilesystemError::UnableToReadFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    })
            })
            .map_err(|e| FilesystemError::metadata(path.as_str(), MetadataKind::MimeType, e))?;
        match self
            .mime_type_detector
            .detect_mime_type(path.as_str(), contents.as_slice())
        {
            Some(mime_type) => Ok(FileAttributes::new(path).mime_type(mime_type)),
            None if path.ends_with(".svg") => Ok(FileAttributes::new(path).mime_type("image/svg")),
            None => Err(FilesystemError::metadata(
                path,
                MetadataKind::MimeType,
                "unknown content type",
            )),
        }
    }

    fn last_modified(&self, path: &str) -> FilesystemResult<StorageAttributes> {
        let path = path_utils::normalize(path)?;
        self.get_metadata(path.as_str(), MetadataKind::LastModified)
    }

    fn file_size(&self, path: &str) -> FilesystemResult<FileAttributes> {
        let path = path_utils::normalize(path)?;
        match self.get_metadata(path.as_str(), MetadataKind::FileSize)? {
            StorageAttributes::File(file) => Ok(file),
            StorageAttributes::Directory(_) => Err(FilesystemError::UnexpectedDirectory { path }),
        }
    }

    fn list_contents(&self, path: &str, deep: bool) -> FilesystemResult<DirectoryListing> {
        let path = path_utils::normalize(path)?;
        self.walk(path.as_str(), deep)
    }

    fn mov(&self, source: &str, destination: &str, _config: &Config) -> FilesystemResult<()> {
        let source = path_utils::normalize(source)?;
        let destination = path_utils::normalize(destination)?;
        let move_err = |reason: String| FilesystemError::UnableToMoveFile {
            from: source.clone(),
            to: destination.clone(),
            reason,
        };
        self.ensure_directory(path_utils::dirname(destination.as_str()))?;
        if let Err(err) = self.get_metadata(source.as_str(), MetadataKind::Generic) {
            return Err(move_err(err.to_string()));
        }
        let src = self.location(source.as_str());
        let dest = self.location(destination.as_str());
        trace!("moving {} to {}", src, dest);
        self.share
            .rename(src.as_str(), dest.as_str())
            .map_err(|e| move_err(e.to_string()))
    }

    fn copy(&self, source: &str, destination: &str, config: &Config) -> FilesystemResult<()> {
        let mut stream = match self.read_stream(source) {
            Ok(stream) => stream,
            Err(err) => {
                debug!("cannot copy {}: {}; skipping", source, err);
                return Ok(());
            }
        };
        self.write_stream(destination, &mut stream, config)
    }
}
