use crate::areas::repository::Repository;
use crate::objects::author::Author;
use crate::objects::blob::Blob;
use crate::objects::commit::Commit;
use crate::objects::entry::Entry;
use crate::objects::entry_mode::EntryMode;
use crate::objects::object::Object;
use crate::objects::tree::Tree;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        // snapshot the workspace: one blob per file
        let mut entries = Vec::new();
        for path in self.workspace().list_files(None)? {
            let data = self.workspace().read_file(&path)?;
            let mode = EntryMode::from_workspace_file(&self.workspace().path().join(&path));

            let mut blob = Blob::new(data);
            let blob_oid = self.database().store(&mut blob)?;

            entries.push(Entry::new(path, blob_oid, mode));
        }

        // assemble the hierarchy and store each tree bottom-up, so every
        // parent serializes with already assigned child identifiers
        let mut root = Tree::build(entries)?;
        root.traverse(&mut |tree: &mut Tree| {
            self.database().store(tree)?;
            Ok(())
        })?;
        let tree_oid = root.oid()?.clone();

        let parent = self.refs().read_head()?;
        let author = Author::load_from_env()?;
        let message = message.trim().to_string();

        let mut commit = Commit::new(parent, tree_oid, author, message);
        let commit_oid = self.database().store(&mut commit)?;
        self.refs().update_head(&commit_oid)?;

        let root_marker = if commit.is_root() { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{}{}] {}",
            root_marker,
            commit_oid.short(),
            commit.short_message()
        )?;

        Ok(())
    }
}
