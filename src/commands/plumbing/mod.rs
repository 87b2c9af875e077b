//! Plumbing commands (low-level object manipulation)

pub mod hash_object;
