//! # Mounted share
//!
//! Share reachable through the host filesystem: an UNC path on Windows, a mount point elsewhere

use std::fs::{self, File, Metadata};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use remotefs::{RemoteError, RemoteErrorType, RemoteResult};

use super::{join_path, DosMode, EntryKind, Share, ShareEntry};

/// Share accessed with the host filesystem
#[derive(Debug, Clone)]
pub struct MountedShare {
    root: PathBuf,
}

impl MountedShare {
    /// Instantiate a new `MountedShare` rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Share root on the host filesystem
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    fn to_entry(path: String, metadata: &Metadata) -> ShareEntry {
        let mode = dos_mode(&path, metadata);
        ShareEntry {
            kind: if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode,
            path,
        }
    }
}

impl Share for MountedShare {
    fn stat(&self, path: &str) -> RemoteResult<Option<ShareEntry>> {
        trace!("get stat for {}", path);
        match fs::metadata(self.resolve(path)) {
            Ok(metadata) => Ok(Some(Self::to_entry(path.to_string(), &metadata))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RemoteError::new_ex(RemoteErrorType::StatFailed, err)),
        }
    }

    fn dir(&self, path: &str) -> RemoteResult<Vec<ShareEntry>> {
        trace!("listing files at {}", path);
        let entries = fs::read_dir(self.resolve(path))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::StatFailed, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RemoteError::new_ex(RemoteErrorType::IoError, e))?;
            // symlinks are not followed; keep only files and directories
            let metadata = entry
                .metadata()
                .map_err(|e| RemoteError::new_ex(RemoteErrorType::StatFailed, e))?;
            if !metadata.is_file() && !metadata.is_dir() {
                debug!("skipping {}: neither a file nor a directory", entry.path().display());
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            files.push(Self::to_entry(join_path(path, &name), &metadata));
        }
        Ok(files)
    }

    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>> {
        trace!("opening file at {} for read", path);
        File::open(self.resolve(path))
            .map(|file| Box::new(file) as Box<dyn Read>)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotOpenFile, e))
    }

    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>> {
        trace!("creating file at {}", path);
        File::create(self.resolve(path))
            .map(|file| Box::new(file) as Box<dyn Write>)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotOpenFile, e))
    }

    fn mkdir(&self, path: &str) -> RemoteResult<()> {
        trace!("making directory at {}", path);
        fs::create_dir(self.resolve(path))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::FileCreateDenied, e))
    }

    fn rmdir(&self, path: &str) -> RemoteResult<()> {
        trace!("removing directory at {}", path);
        fs::remove_dir(self.resolve(path))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotRemoveFile, e))
    }

    fn del(&self, path: &str) -> RemoteResult<()> {
        trace!("removing file {}", path);
        fs::remove_file(self.resolve(path))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotRemoveFile, e))
    }

    fn rename(&self, src: &str, dest: &str) -> RemoteResult<()> {
        trace!("moving {} to {}", src, dest);
        fs::rename(self.resolve(src), self.resolve(dest))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::ProtocolError, e))
    }

    #[cfg(target_family = "windows")]
    fn set_mode(&self, path: &str, mode: DosMode) -> RemoteResult<()> {
        trace!("setting mode {:?} for {}", mode, path);
        super::windows::set_file_attributes(&self.resolve(path), mode)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::ProtocolError, e))
    }

    #[cfg(not(target_family = "windows"))]
    fn set_mode(&self, path: &str, _mode: DosMode) -> RemoteResult<()> {
        error!("cannot set DOS attributes for {}: not supported by mounted shares", path);
        Err(RemoteError::new(RemoteErrorType::UnsupportedFeature))
    }
}

#[cfg(target_family = "windows")]
fn dos_mode(_path: &str, metadata: &Metadata) -> DosMode {
    use std::os::windows::fs::MetadataExt;

    DosMode::from_bits_truncate(metadata.file_attributes())
}

/// Dot files are the closest thing to the hidden attribute on a mount point
#[cfg(not(target_family = "windows"))]
fn dos_mode(path: &str, metadata: &Metadata) -> DosMode {
    let mut mode = if metadata.is_dir() {
        DosMode::DIRECTORY
    } else {
        DosMode::ARCHIVE
    };
    if metadata.permissions().readonly() {
        mode |= DosMode::READONLY;
    }
    let name = path.rsplit('/').next().unwrap_or_default();
    if name.starts_with('.') {
        mode |= DosMode::HIDDEN;
    }
    mode
}
