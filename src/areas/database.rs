//! Content-addressable object database
//!
//! Objects are serialized as `<type> <byte-length>\0<content>`, hashed with
//! SHA-1 to obtain their identifier, zlib-compressed and persisted under
//! `objects/<2-hex>/<38-hex>`. The destination filename is a pure function
//! of content, so racing writers of identical objects are benign; writers
//! never share a temporary file because temp names are created with
//! exclusive semantics.

use crate::objects::object::Object;
use crate::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, new)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Compute the identifier an object would be stored under, without
    /// persisting it or assigning its slot.
    pub fn hash(&self, object: &dyn Object) -> anyhow::Result<ObjectId> {
        let (oid, _) = Self::serialize_envelope(object)?;
        Ok(oid)
    }

    /// Persist an object and assign its identifier.
    ///
    /// The write is atomic: content lands in a uniquely named temporary
    /// file in the destination shard, is flushed, then renamed into place.
    /// The temporary file is removed on every failure path. An object whose
    /// file already exists is not rewritten.
    pub fn store(&self, object: &mut dyn Object) -> anyhow::Result<ObjectId> {
        let (oid, envelope) = Self::serialize_envelope(object)?;
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            self.write_object(&object_path, &envelope)?;
            debug!(oid = %oid, kind = object.object_type().as_str(), "stored object");
        }

        object.set_oid(oid.clone())?;
        Ok(oid)
    }

    fn serialize_envelope(object: &dyn Object) -> anyhow::Result<(ObjectId, Vec<u8>)> {
        let content = object.serialize()?;

        let mut envelope = Vec::with_capacity(content.len() + 32);
        write!(
            envelope,
            "{} {}\0",
            object.object_type().as_str(),
            content.len()
        )?;
        envelope.extend_from_slice(&content);

        let oid = ObjectId::from_digest(&Sha1::digest(&envelope));
        Ok((oid, envelope))
    }

    fn write_object(&self, object_path: &Path, envelope: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!(
                "unable to create object directory {}",
                object_dir.display()
            )
        })?;

        let temp_path = object_dir.join(Self::generate_temp_name());
        let compressed = Self::compress(envelope)?;

        if let Err(err) = Self::write_and_rename(&temp_path, object_path, &compressed) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err);
        }

        Ok(())
    }

    fn write_and_rename(
        temp_path: &Path,
        object_path: &Path,
        compressed: &[u8],
    ) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .with_context(|| {
                format!("unable to create temporary file {}", temp_path.display())
            })?;

        file.write_all(compressed)
            .with_context(|| format!("unable to write object file {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("unable to flush object file {}", temp_path.display()))?;
        drop(file);

        std::fs::rename(temp_path, object_path).with_context(|| {
            format!("unable to rename object file to {}", object_path.display())
        })
    }

    fn compress(data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .context("unable to compress object content")?;
        encoder
            .finish()
            .context("unable to finish compressing object content")
    }

    fn generate_temp_name() -> PathBuf {
        PathBuf::from(format!("tmp-obj-{}", rand::random::<u32>()))
    }
}
