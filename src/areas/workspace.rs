//! Working directory file system operations
//!
//! Enumerates, reads and stats workspace files on behalf of the commands.
//! The control directory is never reported.

use crate::index::index_entry::EntryMetadata;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List workspace-relative file paths under `root` (the whole
    /// workspace when `None`). A path naming a single file yields just
    /// that file.
    pub fn list_files(&self, root: Option<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
        let root = match root {
            Some(path) => std::fs::canonicalize(&path)
                .with_context(|| format!("pathspec {:?} did not match any files", path))?,
            None => self.path.to_path_buf(),
        };

        if root.is_dir() {
            Ok(WalkDir::new(&root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.relativize_file(entry.path()))
                .collect())
        } else {
            Ok(self.relativize_file(&root).into_iter().collect())
        }
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);
        let content = std::fs::read(&full_path)
            .with_context(|| format!("unable to read file {}", full_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn stat_file(&self, file_path: &Path) -> anyhow::Result<EntryMetadata> {
        let full_path = self.path.join(file_path);
        let metadata = std::fs::metadata(&full_path)
            .with_context(|| format!("unable to stat file {}", full_path.display()))?;

        (full_path.as_path(), metadata).try_into()
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    fn relativize_file(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
