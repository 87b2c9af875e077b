use crate::areas::repository::Repository;
use crate::index::index_entry::IndexEntry;
use crate::objects::blob::Blob;
use std::path::PathBuf;

impl Repository {
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();

        // expand each argument: directories stage every file beneath them
        let paths = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(PathBuf::from(path))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let data = self.workspace().read_file(&path)?;
            let stat = self.workspace().stat_file(&path)?;

            let mut blob = Blob::new(data);
            let blob_oid = self.database().store(&mut blob)?;

            index.add(IndexEntry::new(path, blob_oid, stat));
        }

        index.write_updates()?;

        Ok(())
    }
}
