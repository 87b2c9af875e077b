use crate::objects::entry_mode::EntryMode;
use crate::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// A flat (path, identifier, mode) record, the input to tree building.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Entry {
    name: PathBuf,
    oid: ObjectId,
    mode: EntryMode,
}

impl Entry {
    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn mode(&self) -> &EntryMode {
        &self.mode
    }

    pub fn basename(&self) -> anyhow::Result<&str> {
        self.name
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid entry name {:?}", self.name))
    }

    /// Ancestor directories from root to the entry's parent, e.g.
    /// `a/b/c.txt` yields `["a", "a/b"]`.
    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = self
            .name
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect();
        dirs.reverse();
        dirs
    }
}
