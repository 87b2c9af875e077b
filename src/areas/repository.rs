use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Wires the repository components together for one command invocation.
///
/// Every component receives its path explicitly at construction; there is
/// no ambient repository state.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: RefCell<Index>,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let git_path = path.join(".git");

        Ok(Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            index: RefCell::new(Index::new(git_path.join("index"))),
            refs: Refs::new(git_path.into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> std::path::PathBuf {
        self.path.join(".git")
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
