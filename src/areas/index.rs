//! Staging area
//!
//! Tracks the files staged for the next commit, keyed by path so re-adding
//! a path overwrites its prior record. The in-memory map is flushed to the
//! binary index file through the lockfile protocol; entries land on disk
//! sorted by path.

use crate::areas::lockfile::Lockfile;
use crate::errors::LockError;
use crate::index::checksum::Checksum;
use crate::index::index_entry::IndexEntry;
use crate::index::index_header::IndexHeader;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Index {
    path: PathBuf,
    entries: BTreeMap<PathBuf, IndexEntry>,
}

impl Index {
    pub fn new(path: PathBuf) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage an entry, replacing any prior record for the same path.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flush the staged entries to disk.
    ///
    /// Acquires the index lock, streams the header and every entry through
    /// a running digest, appends the SHA-1 trailer and commits the lock in
    /// one rename. Contention surfaces as [`LockError::Denied`].
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut lockfile = Lockfile::new(self.path.clone());
        if !lockfile.hold_for_update()? {
            return Err(LockError::Denied {
                path: self.path.clone(),
            }
            .into());
        }

        let header = IndexHeader::new(self.entries.len() as u32).serialize()?;

        let mut writer = Checksum::new(&mut lockfile);
        writer.write(&header)?;
        for entry in self.entries.values() {
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;

        lockfile.commit()?;
        debug!(entries = self.entries.len(), path = %self.path.display(), "wrote index");

        Ok(())
    }
}
