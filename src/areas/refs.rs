//! HEAD reference management
//!
//! HEAD holds the current commit identifier as a single line of text. It is
//! the serialization point for linear history: updates go through the
//! lockfile protocol, so two concurrent commits cannot both advance HEAD
//! from the same parent — the second one fails with a lock-denied error
//! instead of silently losing an update.

use crate::areas::lockfile::Lockfile;
use crate::errors::LockError;
use crate::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    /// The current head commit, or `None` before the first commit.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match std::fs::read_to_string(self.head_path()) {
            Ok(content) => Ok(Some(ObjectId::try_parse(content.trim().to_string())?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(anyhow::Error::new(err))
                .with_context(|| format!("unable to read {}", self.head_path().display())),
        }
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let head_path = self.head_path();
        let mut lockfile = Lockfile::new(head_path.clone());

        if !lockfile.hold_for_update()? {
            return Err(LockError::Denied { path: head_path }.into());
        }

        lockfile.write_str(&format!("{oid}\n"))?;
        lockfile.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sha1::{Digest, Sha1};

    fn some_oid(data: &[u8]) -> ObjectId {
        ObjectId::from_digest(&Sha1::digest(data))
    }

    #[test]
    fn missing_head_reads_as_no_parent() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());

        assert_eq!(refs.read_head().unwrap(), None);
    }

    #[test]
    fn updated_head_reads_back_trimmed() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());

        let oid = some_oid(b"commit one");
        refs.update_head(&oid).unwrap();

        assert_eq!(
            std::fs::read_to_string(refs.head_path()).unwrap(),
            format!("{oid}\n")
        );
        assert_eq!(refs.read_head().unwrap(), Some(oid));
    }

    #[test]
    fn contended_head_update_fails_with_lock_denied() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());

        // simulate a stuck or in-flight writer
        std::fs::write(dir.path().join("HEAD.lock"), b"").unwrap();

        let err = refs.update_head(&some_oid(b"commit two")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LockError>(),
            Some(LockError::Denied { .. })
        ));
    }

    #[test]
    fn successive_updates_chain_linearly() {
        let dir = assert_fs::TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());

        let first = some_oid(b"first");
        let second = some_oid(b"second");

        refs.update_head(&first).unwrap();
        assert_eq!(refs.read_head().unwrap(), Some(first));

        refs.update_head(&second).unwrap();
        assert_eq!(refs.read_head().unwrap(), Some(second));
    }
}
