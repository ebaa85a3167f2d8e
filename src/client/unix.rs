//! # UNIX client
//!
//! libsmbclient implementation of the share client

// -- exports
use std::io::{Read, Write};

pub use pavao::{SmbClient, SmbCredentials, SmbEncryptionLevel, SmbOptions, SmbShareMode};
use pavao::{SmbDirentType, SmbMode, SmbOpenOptions};
use remotefs::{RemoteError, RemoteErrorType, RemoteResult};

use super::{join_path, DosMode, Share, ShareEntry};
use crate::utils::smb as smb_utils;

/// SMB share client
pub struct SmbShare {
    client: SmbClient,
}

impl SmbShare {
    /// Try to create a new `SmbShare`.
    /// Fails if it is not possible to instantiate a smb context.
    pub fn try_new(credentials: SmbCredentials, options: SmbOptions) -> RemoteResult<Self> {
        Ok(Self {
            client: SmbClient::new(credentials, options)
                .map_err(|e| RemoteError::new_ex(RemoteErrorType::BadAddress, e))?,
        })
    }

    /// Return a reference to the inner `pavao::SmbClient`
    pub fn client(&self) -> &SmbClient {
        &self.client
    }

    /// Check whether the server can be reached with the configured credentials
    pub fn check_connection(&self) -> RemoteResult<()> {
        trace!("checking connection...");
        match self.client.get_user() {
            Err(e) => {
                error!("connection ERROR: {}", e);
                Err(RemoteError::new_ex(RemoteErrorType::ConnectionError, e))
            }
            Ok(_) => {
                trace!("connection OK");
                Ok(())
            }
        }
    }
}

impl Share for SmbShare {
    fn stat(&self, path: &str) -> RemoteResult<Option<ShareEntry>> {
        self.check_connection()?;
        trace!("get stat for {}", path);
        // connection is fine, so any stat failure means the entry is not there
        match self.client.stat(path) {
            Ok(stat) => Ok(Some(smb_utils::smbstat_to_entry(path, stat))),
            Err(e) => {
                debug!("stat failed for {}: {}", path, e);
                Ok(None)
            }
        }
    }

    fn dir(&self, path: &str) -> RemoteResult<Vec<ShareEntry>> {
        self.check_connection()?;
        trace!("listing files at {}", path);
        let dirents = self
            .client
            .list_dir(path)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::StatFailed, e))?;
        // stat each dirent (NOTE: KEEP ONLY FILES AND DIRECTORIES)
        let mut entries = Vec::with_capacity(dirents.len());
        for dirent in dirents {
            let keep = matches!(dirent.get_type(), SmbDirentType::File | SmbDirentType::Dir)
                && dirent.name() != "."
                && dirent.name() != "..";
            if !keep {
                continue;
            }
            let uri = join_path(path, dirent.name());
            let stat = self
                .client
                .stat(uri.as_str())
                .map_err(|e| RemoteError::new_ex(RemoteErrorType::StatFailed, e))?;
            entries.push(smb_utils::smbstat_to_entry(uri, stat));
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>> {
        self.check_connection()?;
        trace!("opening file at {} for read", path);
        let file = self
            .client
            .open_with(path, SmbOpenOptions::default().read(true))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotOpenFile, e))?;
        Ok(Box::new(file))
    }

    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>> {
        self.check_connection()?;
        trace!("creating file at {}", path);
        let file = self
            .client
            .open_with(
                path,
                SmbOpenOptions::default()
                    .create(true)
                    .truncate(true)
                    .write(true)
                    .mode(0o644 as libc::mode_t),
            )
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotOpenFile, e))?;
        Ok(Box::new(file))
    }

    fn mkdir(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("making directory at {}", path);
        self.client
            .mkdir(path, SmbMode::from(0o755 as libc::mode_t))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::FileCreateDenied, e))
    }

    fn rmdir(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("removing directory at {}", path);
        self.client
            .rmdir(path)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotRemoveFile, e))
    }

    fn del(&self, path: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("removing file {}", path);
        self.client
            .unlink(path)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::CouldNotRemoveFile, e))
    }

    fn rename(&self, src: &str, dest: &str) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("moving {} to {}", src, dest);
        self.client
            .rename(src, dest)
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::ProtocolError, e))
    }

    fn set_mode(&self, path: &str, mode: DosMode) -> RemoteResult<()> {
        self.check_connection()?;
        trace!("setting mode {:?} for {}", mode, path);
        self.client
            .chmod(path, SmbMode::from(smb_utils::dos_to_unix_mode(mode)))
            .map_err(|e| RemoteError::new_ex(RemoteErrorType::ProtocolError, e))
    }
}
