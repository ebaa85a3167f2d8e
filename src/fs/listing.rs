//! ## Listing
//!
//! Result of a `list_contents` call

use std::vec::IntoIter;

use super::StorageAttributes;

/// Ordered entries of a single directory listing.
///
/// The listing is consumed once; list the directory again to start over.
#[derive(Debug)]
pub struct DirectoryListing {
    entries: IntoIter<StorageAttributes>,
}

impl DirectoryListing {
    pub(crate) fn new(entries: Vec<StorageAttributes>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }

    /// Listing of something which is not a directory
    pub(crate) fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Iterator for DirectoryListing {
    type Item = StorageAttributes;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for DirectoryListing {}
