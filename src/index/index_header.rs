use crate::index::{SIGNATURE, VERSION};
use byteorder::WriteBytesExt;
use bytes::Bytes;
use std::io::Write;

/// The fixed 12-byte index file header.
#[derive(Debug, Clone)]
pub struct IndexHeader {
    marker: &'static str,
    version: u32,
    entries_count: u32,
}

impl IndexHeader {
    pub fn new(entries_count: u32) -> Self {
        IndexHeader {
            marker: SIGNATURE,
            version: VERSION,
            entries_count,
        }
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut header_bytes = Vec::with_capacity(crate::index::HEADER_SIZE);
        header_bytes.write_all(self.marker.as_bytes())?;
        header_bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        header_bytes.write_u32::<byteorder::NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(header_bytes))
    }
}
