use crate::areas::repository::Repository;
use crate::objects::blob::Blob;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, file: &str, write: bool) -> anyhow::Result<()> {
        let data = self.workspace().read_file(Path::new(file))?;
        let mut blob = Blob::new(data);

        let oid = if write {
            self.database().store(&mut blob)?
        } else {
            self.database().hash(&blob)?
        };

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
