//! Single-writer update protocol for a tracked file
//!
//! A writer acquires the lock by creating `<path>.lock` with exclusive
//! creation semantics, streams the new content into that sibling, and
//! publishes it with one atomic rename onto the target. Readers either see
//! the old content or the new content, never a partial write.
//!
//! A holder that fails before committing leaves the sentinel in place so
//! the next acquisition correctly reports contention; stuck locks are
//! cleared manually by the operator, never automatically.

use crate::errors::LockError;
use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub struct Lockfile {
    file_path: PathBuf,
    lock_path: PathBuf,
    handle: Option<File>,
}

impl Lockfile {
    pub fn new(path: PathBuf) -> Self {
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");

        Lockfile {
            file_path: path,
            lock_path: PathBuf::from(lock_path),
            handle: None,
        }
    }

    /// Try to acquire the lock for writing.
    ///
    /// Returns `Ok(false)` when another holder already owns it; a missing
    /// parent directory or denied permission is an error.
    pub fn hold_for_update(&mut self) -> anyhow::Result<bool> {
        if self.handle.is_some() {
            return Ok(true);
        }

        match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&self.lock_path)
        {
            Ok(file) => {
                debug!(path = %self.lock_path.display(), "acquired lock");
                self.handle = Some(file);
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(anyhow::Error::new(err).context(format!(
                "unable to create lock file {}",
                self.lock_path.display()
            ))),
        }
    }

    pub fn write_str(&mut self, content: &str) -> anyhow::Result<()> {
        self.write_bytes(content.as_bytes())
    }

    pub fn write_bytes(&mut self, content: &[u8]) -> anyhow::Result<()> {
        let lock_path = self.lock_path.clone();
        self.held_handle()?
            .write_all(content)
            .with_context(|| format!("unable to write lock file {}", lock_path.display()))
    }

    /// Flush and close the sibling, then rename it onto the target path,
    /// making the new content visible in one filesystem operation.
    ///
    /// Consumes the lockfile: a committed lock cannot be written again.
    pub fn commit(mut self) -> anyhow::Result<()> {
        let handle = self.handle.take().ok_or(LockError::NotHeld {
            path: self.lock_path.clone(),
        })?;

        handle
            .sync_all()
            .with_context(|| format!("unable to flush lock file {}", self.lock_path.display()))?;
        drop(handle);

        std::fs::rename(&self.lock_path, &self.file_path).with_context(|| {
            format!(
                "unable to rename lock file onto {}",
                self.file_path.display()
            )
        })?;
        debug!(path = %self.file_path.display(), "committed lock");

        Ok(())
    }

    fn held_handle(&mut self) -> anyhow::Result<&mut File> {
        let lock_path = &self.lock_path;
        self.handle.as_mut().ok_or_else(|| {
            anyhow::Error::new(LockError::NotHeld {
                path: lock_path.clone(),
            })
        })
    }
}
