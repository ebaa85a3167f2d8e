#![crate_name = "smbfs_adapter"]
#![crate_type = "lib"]

//! # smbfs-adapter
//!
//! smbfs-adapter exposes a SMB network share through a uniform filesystem interface: files and
//! directories are addressed by logical paths relative to a configurable root, missing parent
//! directories are created on write and listings can be shallow or recursive.
//!
//! ## Get started
//!
//! Add the adapter to your project dependencies:
//!
//! ```toml
//! smbfs-adapter = "^0.1"
//! ```
//!
//! these features are supported:
//!
//! - `smbclient`: enable the libsmbclient backed `SmbShare` on UNIX. Requires libsmbclient to be installed.
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//! ### Mounted share
//!
//! Any directory reachable through the local filesystem can be used as a share, for example a
//! share mounted with `mount.cifs` or a UNC path on Windows.
//!
//! ```rust
//! use smbfs_adapter::{Config, FilesystemAdapter, MountedShare, SmbAdapter};
//!
//! let root = std::env::temp_dir().join("smbfs-adapter-doc");
//! std::fs::create_dir_all(&root).unwrap();
//!
//! let adapter = SmbAdapter::new(MountedShare::new(&root));
//! // parent directories are created on write
//! adapter
//!     .write("reports/2024/q4.txt", b"revenue", &Config::default())
//!     .unwrap();
//! assert!(adapter.file_exists("reports/2024/q4.txt").unwrap());
//! assert!(adapter.directory_exists("reports/2024").unwrap());
//! // deep listing: files first, then directories from the deepest
//! for entry in adapter.list_contents("reports", true).unwrap() {
//!     println!("{}", entry.path());
//! }
//! adapter.delete_directory("reports").unwrap();
//! ```
//!
//! ### Smb client (UNIX)
//!
//! With the `smbclient` feature, the share is accessed through libsmbclient.
//!
//! ```rust,ignore
//! use smbfs_adapter::{
//!     AdapterConfig, Config, FilesystemAdapter, SmbAdapter, SmbCredentials, SmbOptions, SmbShare,
//!     Visibility,
//! };
//!
//! let share = SmbShare::try_new(
//!     SmbCredentials::default()
//!         .server("smb://localhost:3445")
//!         .share("/temp")
//!         .username("test")
//!         .password("test")
//!         .workgroup("pavao"),
//!     SmbOptions::default()
//!         .case_sensitive(true)
//!         .one_share_per_server(true),
//! )
//! .unwrap();
//! let adapter = SmbAdapter::with_config(share, AdapterConfig::default().prefix("/tenants/acme"));
//! adapter
//!     .write(
//!         "invoices/0001.pdf",
//!         b"%PDF-1.7",
//!         &Config::default().visibility(Visibility::Private),
//!     )
//!     .unwrap();
//! ```
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

// -- crates
#[macro_use]
extern crate log;

mod adapter;
mod client;
pub mod fs;

pub use adapter::{AdapterConfig, SmbAdapter};
pub use client::{DosMode, EntryKind, MountedShare, Share, ShareEntry};
#[cfg(all(target_family = "unix", feature = "smbclient"))]
pub use client::{SmbCredentials, SmbEncryptionLevel, SmbOptions, SmbShare, SmbShareMode};
#[cfg(target_family = "windows")]
pub use client::SmbCredentials;
pub use fs::{
    Config, ContentMimeTypeDetector, DirectoryAttributes, DirectoryListing, FileAttributes,
    FilesystemAdapter, FilesystemError, FilesystemResult, MetadataKind, MimeTypeDetector,
    StorageAttributes, Visibility,
};

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
