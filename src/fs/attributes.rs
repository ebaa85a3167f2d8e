//! ## Attributes
//!
//! Normalized description of the entries stored on a filesystem

use std::time::SystemTime;

/// Coarse access attribute of a stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Derive visibility from the remote hidden flag
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden {
            Self::Private
        } else {
            Self::Public
        }
    }
}

/// Attributes of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    pub path: String,
    pub size: Option<u64>,
    pub visibility: Option<Visibility>,
    pub last_modified: Option<SystemTime>,
    pub mime_type: Option<String>,
}

impl FileAttributes {
    /// Instantiate new `FileAttributes` with only the path set
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            size: None,
            visibility: None,
            last_modified: None,
            mime_type: None,
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn last_modified(mut self, time: SystemTime) -> Self {
        self.last_modified = Some(time);
        self
    }

    pub fn mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Attributes of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAttributes {
    pub path: String,
    pub visibility: Option<Visibility>,
    pub last_modified: Option<SystemTime>,
}

impl DirectoryAttributes {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            visibility: None,
            last_modified: None,
        }
    }

    pub fn last_modified(mut self, time: SystemTime) -> Self {
        self.last_modified = Some(time);
        self
    }
}

/// A normalized filesystem entry: either a file or a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageAttributes {
    File(FileAttributes),
    Directory(DirectoryAttributes),
}

impl StorageAttributes {
    /// Path relative to the adapter root
    pub fn path(&self) -> &str {
        match self {
            Self::File(file) => file.path.as_str(),
            Self::Directory(dir) => dir.path.as_str(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            Self::File(file) => file.visibility,
            Self::Directory(dir) => dir.visibility,
        }
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        match self {
            Self::File(file) => file.last_modified,
            Self::Directory(dir) => dir.last_modified,
        }
    }

    /// Returns file attributes, if the entry is a file
    pub fn as_file(&self) -> Option<&FileAttributes> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }
}

impl From<FileAttributes> for StorageAttributes {
    fn from(file: FileAttributes) -> Self {
        Self::File(file)
    }
}

impl From<DirectoryAttributes> for StorageAttributes {
    fn from(dir: DirectoryAttributes) -> Self {
        Self::Directory(dir)
    }
}
