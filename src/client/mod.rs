//! # client
//!
//! Remote share clients the adapter is built on

use std::io::{Read, Write};
use std::time::SystemTime;

use remotefs::RemoteResult;

use crate::fs::Visibility;

// -- mounted share

mod mounted;
pub use mounted::MountedShare;

// -- unix client

#[cfg(all(target_family = "unix", feature = "smbclient"))]
mod unix;
#[cfg(all(target_family = "unix", feature = "smbclient"))]
pub use unix::*;

// -- windows client

#[cfg(target_family = "windows")]
mod windows;
#[cfg(target_family = "windows")]
pub use windows::*;

bitflags::bitflags! {
    /// DOS attributes of a share entry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DosMode: u32 {
        const READONLY = 0x01;
        const HIDDEN = 0x02;
        const SYSTEM = 0x04;
        const DIRECTORY = 0x10;
        const ARCHIVE = 0x20;
        const NORMAL = 0x80;
    }
}

impl From<Visibility> for DosMode {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Private => DosMode::HIDDEN | DosMode::ARCHIVE,
            Visibility::Public => DosMode::ARCHIVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// An entry on the remote share, as reported by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareEntry {
    /// Absolute path on the share
    pub path: String,
    pub kind: EntryKind,
    /// Size in bytes; meaningless for directories
    pub size: u64,
    pub modified: SystemTime,
    pub mode: DosMode,
}

impl ShareEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_hidden(&self) -> bool {
        self.mode.contains(DosMode::HIDDEN)
    }
}

/// A client able to operate on a remote share.
///
/// Paths passed to the client are absolute share paths (root prefix already applied).
pub trait Share {
    /// Stat the entry at `path`. Returns `None` if it doesn't exist
    fn stat(&self, path: &str) -> RemoteResult<Option<ShareEntry>>;

    /// List the immediate children of the directory at `path`
    fn dir(&self, path: &str) -> RemoteResult<Vec<ShareEntry>>;

    /// Open the file at `path` for reading
    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>>;

    /// Create or truncate the file at `path` and open it for writing.
    ///
    /// The file is closed when the returned stream is dropped.
    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>>;

    fn mkdir(&self, path: &str) -> RemoteResult<()>;

    fn rmdir(&self, path: &str) -> RemoteResult<()>;

    fn del(&self, path: &str) -> RemoteResult<()>;

    fn rename(&self, src: &str, dest: &str) -> RemoteResult<()>;

    /// Set the DOS attributes of the entry at `path`
    fn set_mode(&self, path: &str, mode: DosMode) -> RemoteResult<()>;
}

/// Join a directory path and a child name
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}
