//! Porcelain commands (user-facing workflows)
//!
//! - `init`: initialize a new repository
//! - `add`: stage files for the next commit
//! - `commit`: record a snapshot of the workspace

pub mod add;
pub mod commit;
pub mod init;
