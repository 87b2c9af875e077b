//! Command implementations
//!
//! Organized in git's two layers:
//!
//! - `plumbing`: low-level object manipulation (hash-object)
//! - `porcelain`: user-facing workflows (init, add, commit)

pub mod plumbing;
pub mod porcelain;
