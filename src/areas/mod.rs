//! Core repository components
//!
//! - `database`: content-addressable object store
//! - `index`: staging area flushed as a binary index file
//! - `lockfile`: exclusive-creation, rename-to-commit write protocol
//! - `refs`: HEAD reference management
//! - `repository`: component wiring
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod lockfile;
pub mod refs;
pub mod repository;
pub mod workspace;
