//! # utils
//!
//! Utilities

pub mod path;
#[cfg(all(target_family = "unix", feature = "smbclient"))]
pub mod smb;
