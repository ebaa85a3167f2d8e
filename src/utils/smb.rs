//! # smb utils
//!
//! SMB protocol utilities.
//!
//! libsmbclient reports DOS attributes through the unix mode bits:
//! `S_IXUSR` is archive, `S_IXGRP` is system, `S_IXOTH` is hidden and a missing `S_IWUSR` is read-only.

use libc::mode_t;
use pavao::SmbStat;

use crate::client::{DosMode, EntryKind, ShareEntry};

const MODE_WRITE: mode_t = 0o222;
const MODE_ARCHIVE: mode_t = 0o100;
const MODE_SYSTEM: mode_t = 0o010;
const MODE_HIDDEN: mode_t = 0o001;

/// Convert `SmbStat` to `ShareEntry`
pub fn smbstat_to_entry<S: AsRef<str>>(uri: S, stat: SmbStat) -> ShareEntry {
    let is_dir = stat.mode.is_dir();
    ShareEntry {
        path: uri.as_ref().to_string(),
        kind: if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
        size: stat.size,
        modified: stat.modified,
        mode: unix_mode_to_dos(mode_t::from(stat.mode), is_dir),
    }
}

/// Get DOS attributes from unix mode bits.
///
/// Directories are always reported executable, so only the read-only bit is meaningful for them.
pub fn unix_mode_to_dos(mode: mode_t, is_dir: bool) -> DosMode {
    let mut dos = DosMode::empty();
    if mode & 0o200 == 0 {
        dos |= DosMode::READONLY;
    }
    if is_dir {
        return dos | DosMode::DIRECTORY;
    }
    if mode & MODE_ARCHIVE != 0 {
        dos |= DosMode::ARCHIVE;
    }
    if mode & MODE_SYSTEM != 0 {
        dos |= DosMode::SYSTEM;
    }
    if mode & MODE_HIDDEN != 0 {
        dos |= DosMode::HIDDEN;
    }
    if dos.is_empty() {
        dos = DosMode::NORMAL;
    }
    dos
}

/// Get the unix mode bits libsmbclient translates into `mode`
pub fn dos_to_unix_mode(mode: DosMode) -> mode_t {
    let mut unix: mode_t = 0o444;
    if !mode.contains(DosMode::READONLY) {
        unix |= MODE_WRITE;
    }
    if mode.contains(DosMode::ARCHIVE) {
        unix |= MODE_ARCHIVE;
    }
    if mode.contains(DosMode::SYSTEM) {
        unix |= MODE_SYSTEM;
    }
    if mode.contains(DosMode::HIDDEN) {
        unix |= MODE_HIDDEN;
    }
    unix
}
