use is_executable::IsExecutable;
use std::path::Path;

/// File mode recorded per tree entry, distinct from full permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
    Directory,
}

impl EntryMode {
    /// The literal mode string used in tree serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Directory => "40000",
        }
    }

    /// The full mode word stored in index entries.
    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => 0o100644,
            EntryMode::Executable => 0o100755,
            EntryMode::Directory => 0o40000,
        }
    }

    /// Derive the mode of a workspace file from its permission bits.
    pub fn from_workspace_file(path: &Path) -> Self {
        if path.is_executable() {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        }
    }
}
