//! Staging index binary format (version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes, big-endian)
//!   - Entry count (4 bytes, big-endian)
//!
//! Entries (variable length, zero-padded to 8-byte multiples):
//!   - Ten 4-byte big-endian stat fields
//!   - 20 raw digest bytes
//!   - 2-byte flags (path length, capped)
//!   - NUL-terminated path
//!
//! Checksum (20 bytes):
//!   - SHA-1 of every preceding byte
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Magic signature identifying index files.
pub const SIGNATURE: &str = "DIRC";

/// Index file format version.
pub const VERSION: u32 = 2;

/// Size of the index header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Size of the SHA-1 trailer in bytes.
pub const CHECKSUM_SIZE: usize = 20;
