use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("failed to create .git/objects directory")?;

        writeln!(
            self.writer(),
            "Initialized empty Kit repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
