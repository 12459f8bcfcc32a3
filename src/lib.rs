//! # elfexec
//!
//! Run an executable by way of its base64 form: read the file, encode it,
//! decode it again, write the result to a fresh temporary file, mark that
//! file executable, run it, and remove it afterwards.
//!
//! The binary is an opaque blob throughout. Nothing here parses, validates
//! or sandboxes it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! path
//!  │
//!  ├─ 1. Input        regular-file check, read all bytes
//!  ├─ 2. Encode       bytes → base64 text
//!  ├─ 3. Decode       base64 text → bytes
//!  ├─ 4. Materialize  create-exclusive temp file, write, chmod 0755
//!  ├─ 5. Run          spawn with no arguments, wait
//!  └─ 6. Cleanup      unlink the temp file on every exit path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elfexec::{run_file, RunConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::default();
//!     let report = run_file("/tmp/sample_bin", &config)?;
//!     if let Some(err) = report.outcome.error() {
//!         println!("{err}");
//!     }
//!     std::process::exit(report.exit_code(config.exit_policy).into());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `elfexec` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod execute;
pub mod observer;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExitPolicy, RunConfig, RunConfigBuilder};
pub use error::{ChildError, ElfExecError};
pub use execute::{run_bytes, run_file};
pub use observer::{NoopObserver, RunObserver, SharedObserver};
pub use output::{ChildOutcome, RunReport};
pub use pipeline::encode::{decode, encode, EncodedPayload};
