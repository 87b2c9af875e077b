use crate::areas::lockfile::Lockfile;
use sha1::{Digest, Sha1};

/// Streams index bytes through the lockfile while keeping a running SHA-1,
/// so the trailer can be appended once every entry has been written.
pub struct Checksum<'a> {
    lockfile: &'a mut Lockfile,
    digest: Sha1,
}

impl<'a> Checksum<'a> {
    pub fn new(lockfile: &'a mut Lockfile) -> Self {
        Checksum {
            lockfile,
            digest: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.lockfile.write_bytes(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written so far as the trailer.
    pub fn write_checksum(self) -> anyhow::Result<()> {
        let checksum = self.digest.finalize();
        self.lockfile.write_bytes(&checksum)
    }
}
