//! Error types for the elfexec library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ElfExecError`] is **fatal**: the run cannot proceed at all (bad
//!   arguments, missing input, undecodable payload, unwritable temp
//!   directory). Returned as `Err(ElfExecError)` from the `run_*` functions
//!   and mapped to exit code 1 by the binary.
//!
//! * [`ChildError`] is **non-fatal**: the artifact was materialised but the
//!   child did not start or did not exit cleanly. Stored inside
//!   [`crate::output::ChildOutcome`] so the caller decides, through
//!   [`crate::config::ExitPolicy`], whether it affects the wrapper's own
//!   exit status.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the elfexec library.
#[derive(Debug, Error)]
pub enum ElfExecError {
    // ── Usage errors ──────────────────────────────────────────────────────
    /// Wrong number of positional arguments.
    #[error("Usage: {program} <path_to_elf_file>")]
    Usage { program: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input path is missing or is not a regular file.
    #[error("Error: File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    /// The input exists but could not be read.
    #[error("Error encoding file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Payload errors ────────────────────────────────────────────────────
    /// The encoded payload is not valid base64.
    #[error("Error decoding payload: {0}")]
    DecodeFailed(#[from] base64::DecodeError),

    // ── Temp artifact errors ──────────────────────────────────────────────
    /// Could not create or write the temporary artifact.
    #[error("Error writing temporary file in '{}': {source}", dir.display())]
    MaterializeFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact was written but its mode bits could not be set.
    #[error("Error making '{}' executable: {source}", path.display())]
    SetPermissionsFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error from the child process.
///
/// The temporary artifact has always been cleaned up by the time a caller
/// sees one of these.
#[derive(Debug, Error)]
pub enum ChildError {
    /// The spawn attempt itself failed (missing file, no permission, bad
    /// format).
    #[error("Unexpected error: failed to start '{}': {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child ran and exited with a non-zero status.
    #[error("Error executing file: '{}' returned non-zero exit status {code}", path.display())]
    NonZeroExit { path: PathBuf, code: i32 },

    /// The child was terminated by a signal.
    #[error("Error executing file: '{}' was terminated by signal {signal}", path.display())]
    Signaled { path: PathBuf, signal: i32 },
}
