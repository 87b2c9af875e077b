//! Typed failure values surfaced through `anyhow`
//!
//! Most failures in this crate are plain I/O faults and travel as
//! `anyhow::Error` with context attached at the call site. The variants
//! below are the ones callers need to tell apart from a filesystem fault,
//! so they are concrete types that can be recovered with `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the lockfile protocol.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another holder owns the lock on this path. Callers should report
    /// "operation already in progress" rather than a filesystem fault.
    #[error("unable to acquire lock on file: {path}")]
    Denied { path: PathBuf },

    /// A write or commit was attempted without holding the lock. This is
    /// protocol misuse, not a recoverable runtime condition.
    #[error("not holding lock on file: {path}")]
    NotHeld { path: PathBuf },
}

/// Misuse of the object identifier slot.
///
/// Identifiers are assigned exactly once, when the database persists the
/// object. Both variants indicate a programming defect in the caller.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("object id read before the object was stored")]
    OidUnassigned,

    #[error("object id assigned twice")]
    OidReassigned,
}
