use anyhow::Context;
use std::path::PathBuf;

/// SHA-1 digest size in bytes.
pub const RAW_SIZE: usize = 20;

/// Hex-encoded digest length.
pub const HEX_SIZE: usize = 40;

/// A 40-character lowercase hex SHA-1 digest identifying one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Build an identifier from a raw 20-byte digest.
    pub fn from_digest(digest: &[u8]) -> Self {
        ObjectId(hex::encode(digest))
    }

    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != HEX_SIZE {
            anyhow::bail!("invalid object id length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid object id characters: {id}");
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven hex characters, for human-facing output.
    pub fn short(&self) -> &str {
        &self.0[..7]
    }

    /// The raw 20-byte (non-hex) form, as embedded in trees and the index.
    pub fn raw_bytes(&self) -> anyhow::Result<Vec<u8>> {
        hex::decode(&self.0).context("object id is not valid hex")
    }

    /// Storage path relative to the objects directory: first two hex
    /// characters as a subdirectory, remaining 38 as the filename.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0[..2]).join(&self.0[2..])
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_a_raw_digest() {
        let digest = [0xabu8; 20];
        let oid = ObjectId::from_digest(&digest);

        assert_eq!(oid.as_str().len(), HEX_SIZE);
        assert_eq!(oid.raw_bytes().unwrap(), digest.to_vec());
    }

    #[test]
    fn splits_into_shard_and_filename() {
        let oid = ObjectId::try_parse("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0".into()).unwrap();

        assert_eq!(
            oid.to_path(),
            PathBuf::from("b6").join("fc4c620b67d95f953a5c1c1230aaab5db5a1b0")
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(ObjectId::try_parse("abc".into()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }
}
