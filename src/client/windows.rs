//! # Windows client
//!
//! Windows support for shares reached through UNC paths

use std::ffi::OsStr;
use std::io;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use remotefs::{RemoteError, RemoteErrorType, RemoteResult};
use windows_sys::Win32::Foundation::NO_ERROR;
use windows_sys::Win32::NetworkManagement::WNet::{
    WNetAddConnection2W, NETRESOURCEW, RESOURCETYPE_DISK,
};
use windows_sys::Win32::Storage::FileSystem::SetFileAttributesW;

use super::{DosMode, MountedShare};

mod credentials;
pub use credentials::SmbCredentials;

impl MountedShare {
    /// Connect to `\\server\share` with the provided credentials.
    ///
    /// Without a username, the current user session is used.
    pub fn connect(credentials: SmbCredentials) -> RemoteResult<Self> {
        let unc = credentials.unc_path().to_path_buf();
        debug!("connecting to {}", unc.display());
        if let Some(username) = credentials.account() {
            let mut remote_name = to_wide(unc.as_os_str());
            let username = to_wide(OsStr::new(username.as_str()));
            let password = credentials
                .password
                .as_deref()
                .map(|p| to_wide(OsStr::new(p)));
            let resource = NETRESOURCEW {
                dwScope: 0,
                dwType: RESOURCETYPE_DISK,
                dwDisplayType: 0,
                dwUsage: 0,
                lpLocalName: ptr::null_mut(),
                lpRemoteName: remote_name.as_mut_ptr(),
                lpComment: ptr::null_mut(),
                lpProvider: ptr::null_mut(),
            };
            let rc = unsafe {
                WNetAddConnection2W(
                    &resource,
                    password.as_ref().map_or(ptr::null(), |p| p.as_ptr()),
                    username.as_ptr(),
                    0,
                )
            };
            if rc != NO_ERROR {
                let err = io::Error::from_raw_os_error(rc as i32);
                error!("connection ERROR: {}", err);
                return Err(RemoteError::new_ex(RemoteErrorType::ConnectionError, err));
            }
        }
        Ok(Self::new(unc))
    }
}

/// Set DOS attributes of the file at `path`
pub(crate) fn set_file_attributes(path: &Path, mode: DosMode) -> io::Result<()> {
    let path = to_wide(path.as_os_str());
    if unsafe { SetFileAttributesW(path.as_ptr(), mode.bits()) } == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn to_wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(once(0)).collect()
}
