//! Run entry points.
//!
//! [`run_file`] drives the whole pipeline from a path; [`run_bytes`] starts
//! from a payload already in memory. Both return `Err` only for fatal
//! failures that happen before the child is spawned. Once the artifact
//! exists, every path out of here goes through cleanup and the child's fate
//! is reported in [`RunReport::outcome`].

use crate::config::RunConfig;
use crate::error::ElfExecError;
use crate::output::RunReport;
use crate::pipeline::{encode, input, materialize, run};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Read `path`, round-trip it through base64, materialise and run it.
///
/// # Errors
/// - [`ElfExecError::NotFound`]: path missing or not a regular file
/// - [`ElfExecError::ReadFailed`]: file could not be read
/// - [`ElfExecError::DecodeFailed`], [`ElfExecError::MaterializeFailed`],
///   [`ElfExecError::SetPermissionsFailed`]: artifact could not be produced
///
/// A child that fails to start or exits non-zero is **not** an error here.
pub fn run_file(path: impl AsRef<Path>, config: &RunConfig) -> Result<RunReport, ElfExecError> {
    let start = Instant::now();
    let path = path.as_ref();
    info!("Starting run: {}", path.display());

    // ── Step 1: Read ─────────────────────────────────────────────────────
    let raw = input::read_input(path)?;
    if let Some(ref o) = config.observer {
        o.on_read(Some(path), raw.len());
    }

    execute_payload(Some(path.to_path_buf()), &raw, config, start)
}

/// Same as [`run_file`], for a payload that is already in memory.
pub fn run_bytes(bytes: &[u8], config: &RunConfig) -> Result<RunReport, ElfExecError> {
    let start = Instant::now();
    info!("Starting run from {} in-memory bytes", bytes.len());
    if let Some(ref o) = config.observer {
        o.on_read(None, bytes.len());
    }

    execute_payload(None, bytes, config, start)
}

fn execute_payload(
    source: Option<PathBuf>,
    raw: &[u8],
    config: &RunConfig,
    start: Instant,
) -> Result<RunReport, ElfExecError> {
    // ── Step 2: Encode / decode ──────────────────────────────────────────
    let encoded = encode::encode(raw);
    let decoded = encode::decode(&encoded)?;

    // ── Step 3: Materialise ──────────────────────────────────────────────
    let artifact = materialize::materialize(&decoded, config)?;
    let temp_path = artifact.path().to_path_buf();
    if let Some(ref o) = config.observer {
        o.on_materialized(&temp_path);
    }

    // ── Step 4: Execute ──────────────────────────────────────────────────
    let outcome = run::run(&temp_path);
    if let Some(err) = outcome.error() {
        info!("Child failed: {}", err);
    }
    if let Some(ref o) = config.observer {
        o.on_child_exit(&outcome);
    }

    // ── Step 5: Cleanup ──────────────────────────────────────────────────
    let cleaned_up = artifact.cleanup().is_ok();
    if let Some(ref o) = config.observer {
        o.on_cleanup(&temp_path, cleaned_up);
    }

    let report = RunReport {
        source,
        payload_len: decoded.len(),
        encoded_len: encoded.len(),
        temp_path,
        outcome,
        cleaned_up,
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        "Run complete: success={} cleaned_up={} {}ms",
        report.outcome.is_success(),
        report.cleaned_up,
        report.duration_ms
    );
    Ok(report)
}
