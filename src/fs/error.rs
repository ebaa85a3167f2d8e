//! ## Error
//!
//! Errors reported by filesystem adapters

use std::fmt;

use thiserror::Error;

/// Result type returned by [`crate::FilesystemAdapter`] operations
pub type FilesystemResult<T> = Result<T, FilesystemError>;

/// Describes which metadata couldn't be retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKind {
    FileSize,
    LastModified,
    MimeType,
    Visibility,
    /// Any metadata; used when the entry itself couldn't be resolved
    Generic,
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileSize => "file size",
            Self::LastModified => "last modified",
            Self::MimeType => "mime type",
            Self::Visibility => "visibility",
            Self::Generic => "metadata",
        };
        f.write_str(name)
    }
}

/// Filesystem adapter error.
///
/// Every variant carries the logical path (prefix not applied) the operation was invoked with.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("unable to check existence for: {path}. {reason}")]
    UnableToCheckExistence { path: String, reason: String },
    #[error("unable to read file from location: {path}. {reason}")]
    UnableToReadFile { path: String, reason: String },
    #[error("unable to write file at location: {path}. {reason}")]
    UnableToWriteFile { path: String, reason: String },
    #[error("unable to delete file located at: {path}. {reason}")]
    UnableToDeleteFile { path: String, reason: String },
    #[error("unable to delete directory located at: {path}. {reason}")]
    UnableToDeleteDirectory { path: String, reason: String },
    #[error("unable to create a directory at {path}. {reason}")]
    UnableToCreateDirectory { path: String, reason: String },
    #[error("unable to set visibility for file {path}. {reason}")]
    UnableToSetVisibility { path: String, reason: String },
    #[error("unable to retrieve the {kind} for file at location: {path}. {reason}")]
    UnableToRetrieveMetadata {
        path: String,
        kind: MetadataKind,
        reason: String,
    },
    #[error("unable to retrieve the file size for {path}: it is a directory")]
    UnexpectedDirectory { path: String },
    #[error("unable to move file from {from} to {to}. {reason}")]
    UnableToMoveFile {
        from: String,
        to: String,
        reason: String,
    },
    #[error("unable to list contents of {path}. {reason}")]
    UnableToListContents { path: String, reason: String },
    #[error("corrupted path detected: {path}")]
    CorruptedPathDetected { path: String },
    #[error("path traversal detected: {path}")]
    PathTraversalDetected { path: String },
}

impl FilesystemError {
    /// Build an [`FilesystemError::UnableToRetrieveMetadata`] error
    pub(crate) fn metadata<P, R>(path: P, kind: MetadataKind, reason: R) -> Self
    where
        P: Into<String>,
        R: ToString,
    {
        Self::UnableToRetrieveMetadata {
            path: path.into(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// Returns the logical path the failed operation was invoked with
    pub fn path(&self) -> &str {
        match self {
            Self::UnableToCheckExistence { path, .. }
            | Self::UnableToReadFile { path, .. }
            | Self::UnableToWriteFile { path, .. }
            | Self::UnableToDeleteFile { path, .. }
            | Self::UnableToDeleteDirectory { path, .. }
            | Self::UnableToCreateDirectory { path, .. }
            | Self::UnableToSetVisibility { path, .. }
            | Self::UnableToRetrieveMetadata { path, .. }
            | Self::UnexpectedDirectory { path }
            | Self::UnableToListContents { path, .. }
            | Self::CorruptedPathDetected { path }
            | Self::PathTraversalDetected { path } => path,
            Self::UnableToMoveFile { from, .. } => from,
        }
    }
}
