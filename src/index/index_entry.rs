//! Index entry representation
//!
//! Each entry records a staged file: its path, content hash and the stat
//! metadata that lets change detection skip re-reading file content. On
//! disk an entry is a 62-byte fixed prefix (ten 4-byte stat fields, the
//! 20-byte raw digest, 2 bytes of flags) followed by the NUL-terminated
//! path, zero-padded to the next multiple of 8 bytes.

use crate::objects::entry_mode::EntryMode;
use crate::objects::object_id::ObjectId;
use byteorder::WriteBytesExt;
use derive_new::new;
use std::cmp::min;
use std::fs::Metadata;
use std::io::Write;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Maximum path length representable in the flags field.
const MAX_PATH_SIZE: usize = 0xfff;

/// Entry records are padded to multiples of this many bytes.
pub const ENTRY_BLOCK: usize = 8;

/// A staged file.
#[derive(Debug, Clone, new)]
pub struct IndexEntry {
    pub name: PathBuf,
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

/// Filesystem metadata captured when a file is staged.
#[derive(Debug, Clone, Default)]
pub struct EntryMetadata {
    pub ctime: i64,
    pub ctime_nsec: i64,
    pub mtime: i64,
    pub mtime_nsec: i64,
    pub dev: u64,
    pub ino: u64,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
}

impl IndexEntry {
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        let path_bytes = self
            .name
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("entry path is not valid UTF-8: {:?}", self.name))?
            .as_bytes();
        let flags = min(path_bytes.len(), MAX_PATH_SIZE) as u16;

        let mut entry_bytes = Vec::with_capacity(64 + path_bytes.len() + ENTRY_BLOCK);
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size as u32)?;
        entry_bytes.write_all(&self.oid.raw_bytes()?)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(flags)?;
        entry_bytes.write_all(path_bytes)?;

        // NUL terminator, then pad the record to the 8-byte boundary
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(entry_bytes)
    }
}

impl TryFrom<(&Path, Metadata)> for EntryMetadata {
    type Error = anyhow::Error;

    fn try_from((file_path, metadata): (&Path, Metadata)) -> Result<Self, Self::Error> {
        let mode = if metadata.is_dir() {
            EntryMode::Directory
        } else {
            EntryMode::from_workspace_file(file_path)
        };

        Ok(Self {
            ctime: metadata.ctime(),
            ctime_nsec: metadata.ctime_nsec(),
            mtime: metadata.mtime(),
            mtime_nsec: metadata.mtime_nsec(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
        })
    }
}
