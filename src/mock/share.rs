//! ## Memory share
//!
//! In-memory share which records every call it receives

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::io::{self, Cursor, Read, Write};
use std::time::{Duration, SystemTime};

use remotefs::{RemoteError, RemoteErrorType, RemoteResult};

use crate::client::{DosMode, EntryKind, Share, ShareEntry};

#[derive(Debug, Clone)]
enum Node {
    File { contents: Vec<u8>, mode: DosMode },
    Directory,
}

#[derive(Debug, Clone)]
struct Record {
    node: Node,
    modified: SystemTime,
}

/// Share kept in memory. Behaves like a real share: parents must exist, removed directories must be empty.
#[derive(Debug)]
pub struct MemoryShare {
    nodes: RefCell<BTreeMap<String, Record>>,
    calls: RefCell<Vec<String>>,
    failing: RefCell<HashSet<&'static str>>,
    clock: RefCell<u64>,
}

impl Default for MemoryShare {
    fn default() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "/".to_string(),
            Record {
                node: Node::Directory,
                modified: SystemTime::UNIX_EPOCH,
            },
        );
        Self {
            nodes: RefCell::new(nodes),
            calls: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
            clock: RefCell::new(0),
        }
    }
}

impl MemoryShare {
    /// Make every call to `operation` (e.g. `"mkdir"`) fail.
    ///
    /// `"stream"` makes read streams fail once opened.
    pub fn fail(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    /// Calls received so far, as `"<operation> <path>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls to `operation` received so far
    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split(' ').next() == Some(operation))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every path on the share, root excluded
    pub fn paths(&self) -> Vec<String> {
        self.nodes
            .borrow()
            .keys()
            .filter(|k| k.as_str() != "/")
            .cloned()
            .collect()
    }

    /// Contents of the file at `path`
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(&key(path)).map(|r| &r.node) {
            Some(Node::File { contents, .. }) => Some(contents.clone()),
            _ => None,
        }
    }

    fn record(&self, operation: &'static str, path: &str) -> RemoteResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("{} {}", operation, key(path)));
        if self.failing.borrow().contains(operation) {
            return Err(RemoteError::new_ex(
                RemoteErrorType::ProtocolError,
                format!("{operation} denied"),
            ));
        }
        Ok(())
    }

    fn tick(&self) -> SystemTime {
        let mut clock = self.clock.borrow_mut();
        *clock += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(*clock)
    }

    fn is_dir(&self, path: &str) -> bool {
        matches!(
            self.nodes.borrow().get(path).map(|r| &r.node),
            Some(Node::Directory)
        )
    }

    fn check_parent(&self, path: &str) -> RemoteResult<()> {
        if self.is_dir(&parent(path)) {
            Ok(())
        } else {
            Err(RemoteError::new_ex(
                RemoteErrorType::FileCreateDenied,
                "parent directory does not exist",
            ))
        }
    }

    fn commit(&self, path: &str, contents: Vec<u8>) {
        let modified = self.tick();
        let mut nodes = self.nodes.borrow_mut();
        let record = nodes.entry(path.to_string()).or_insert(Record {
            node: Node::File {
                contents: Vec::new(),
                mode: DosMode::ARCHIVE,
            },
            modified,
        });
        record.modified = modified;
        if let Node::File { contents: current, .. } = &mut record.node {
            *current = contents;
        }
    }

    fn to_entry(path: &str, record: &Record) -> ShareEntry {
        match &record.node {
            Node::File { contents, mode } => ShareEntry {
                path: path.to_string(),
                kind: EntryKind::File,
                size: contents.len() as u64,
                modified: record.modified,
                mode: *mode,
            },
            Node::Directory => ShareEntry {
                path: path.to_string(),
                kind: EntryKind::Directory,
                size: 0,
                modified: record.modified,
                mode: DosMode::DIRECTORY,
            },
        }
    }
}

impl Share for MemoryShare {
    fn stat(&self, path: &str) -> RemoteResult<Option<ShareEntry>> {
        self.record("stat", path)?;
        let path = key(path);
        Ok(self
            .nodes
            .borrow()
            .get(&path)
            .map(|record| Self::to_entry(&path, record)))
    }

    fn dir(&self, path: &str) -> RemoteResult<Vec<ShareEntry>> {
        self.record("dir", path)?;
        let path = key(path);
        if !self.is_dir(&path) {
            return Err(RemoteError::new_ex(
                RemoteErrorType::StatFailed,
                "no such directory",
            ));
        }
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != "/" && parent(k) == path)
            .map(|(k, record)| Self::to_entry(k, record))
            .collect())
    }

    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>> {
        self.record("read", path)?;
        match self.contents(path) {
            Some(_) if self.failing.borrow().contains("stream") => Ok(Box::new(BrokenReader)),
            Some(contents) => Ok(Box::new(Cursor::new(contents))),
            None => Err(RemoteError::new_ex(
                RemoteErrorType::CouldNotOpenFile,
                "no such file",
            )),
        }
    }

    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>> {
        self.record("write", path)?;
        let path = key(path);
        self.check_parent(&path)?;
        if self.is_dir(&path) {
            return Err(RemoteError::new_ex(
                RemoteErrorType::CouldNotOpenFile,
                "is a directory",
            ));
        }
        self.commit(&path, Vec::new());
        Ok(Box::new(MemoryWriter {
            share: self,
            path,
            buffer: Vec::new(),
        }))
    }

    fn mkdir(&self, path: &str) -> RemoteResult<()> {
        self.record("mkdir", path)?;
        let path = key(path);
        self.check_parent(&path)?;
        if self.nodes.borrow().contains_key(&path) {
            return Err(RemoteError::new(RemoteErrorType::DirectoryAlreadyExists));
        }
        let modified = self.tick();
        self.nodes.borrow_mut().insert(
            path,
            Record {
                node: Node::Directory,
                modified,
            },
        );
        Ok(())
    }

    fn rmdir(&self, path: &str) -> RemoteResult<()> {
        self.record("rmdir", path)?;
        let path = key(path);
        if !self.is_dir(&path) {
            return Err(RemoteError::new_ex(
                RemoteErrorType::CouldNotRemoveFile,
                "not a directory",
            ));
        }
        if self.nodes.borrow().keys().any(|k| parent(k) == path && k != "/") {
            return Err(RemoteError::new_ex(
                RemoteErrorType::CouldNotRemoveFile,
                "directory not empty",
            ));
        }
        self.nodes.borrow_mut().remove(&path);
        Ok(())
    }

    fn del(&self, path: &str) -> RemoteResult<()> {
        self.record("del", path)?;
        let path = key(path);
        if self.contents(&path).is_none() {
            return Err(RemoteError::new_ex(
                RemoteErrorType::CouldNotRemoveFile,
                "no such file",
            ));
        }
        self.nodes.borrow_mut().remove(&path);
        Ok(())
    }

    fn rename(&self, src: &str, dest: &str) -> RemoteResult<()> {
        self.record("rename", src)?;
        let (src, dest) = (key(src), key(dest));
        self.check_parent(&dest)?;
        let mut nodes = self.nodes.borrow_mut();
        let moved: Vec<String> = nodes
            .keys()
            .filter(|k| **k == src || k.starts_with(&format!("{src}/")))
            .cloned()
            .collect();
        if moved.is_empty() {
            return Err(RemoteError::new_ex(
                RemoteErrorType::ProtocolError,
                "no such file or directory",
            ));
        }
        for old in moved {
            if let Some(record) = nodes.remove(&old) {
                nodes.insert(format!("{}{}", dest, &old[src.len()..]), record);
            }
        }
        Ok(())
    }

    fn set_mode(&self, path: &str, mode: DosMode) -> RemoteResult<()> {
        self.record("set_mode", path)?;
        match self.nodes.borrow_mut().get_mut(&key(path)).map(|r| &mut r.node) {
            Some(Node::File { mode: current, .. }) => {
                *current = mode;
                Ok(())
            }
            Some(Node::Directory) => Ok(()),
            None => Err(RemoteError::new_ex(
                RemoteErrorType::ProtocolError,
                "no such file",
            )),
        }
    }
}

/// Write stream; contents are stored on flush and when the stream is closed
struct MemoryWriter<'a> {
    share: &'a MemoryShare,
    path: String,
    buffer: Vec<u8>,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.share.commit(&self.path, self.buffer.clone());
        Ok(())
    }
}

impl Drop for MemoryWriter<'_> {
    fn drop(&mut self) {
        self.share.commit(&self.path, std::mem::take(&mut self.buffer));
        self.share
            .calls
            .borrow_mut()
            .push(format!("close {}", self.path));
    }
}

/// Read stream whose connection dropped
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

/// Canonical form of a share path: leading `/`, no trailing `/`, no empty segments
fn key(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn parent(path: &str) -> String {
    match path.rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}
