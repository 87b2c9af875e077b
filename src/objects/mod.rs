//! Object model
//!
//! The three immutable object kinds stored in the database:
//!
//! - `blob`: raw file content
//! - `tree`: a directory snapshot mapping basenames to blobs or subtrees
//! - `commit`: a tree plus parent, author and message
//!
//! Each kind exposes its type tag and canonical content bytes through the
//! [`object::Object`] trait; hashing and persistence live in the database.

pub mod author;
pub mod blob;
pub mod commit;
pub mod entry;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
