//! Execution: spawn the artifact, wait for it, classify how it ended.
//!
//! The child gets no arguments and inherits stdin, stdout and stderr. There
//! is no timeout; a child that never exits blocks the run forever.

use crate::error::ChildError;
use crate::output::ChildOutcome;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Spawn `path`, wait for it to exit, and report the outcome.
pub fn run(path: &Path) -> ChildOutcome {
    let program = spawnable(path);
    info!("Executing {}", program.display());

    match Command::new(&program).status() {
        Ok(status) => {
            debug!("{} exited: {}", program.display(), status);
            classify(path, status)
        }
        Err(source) => ChildOutcome::Failed(ChildError::SpawnFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Map an exit status onto a [`ChildOutcome`].
pub fn classify(path: &Path, status: ExitStatus) -> ChildOutcome {
    if status.success() {
        return ChildOutcome::Success;
    }
    if let Some(code) = status.code() {
        return ChildOutcome::Failed(ChildError::NonZeroExit {
            path: path.to_path_buf(),
            code,
        });
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ChildOutcome::Failed(ChildError::Signaled {
                path: path.to_path_buf(),
                signal,
            });
        }
    }
    // Stopped/continued statuses never reach here from `status()`.
    ChildOutcome::Failed(ChildError::NonZeroExit {
        path: path.to_path_buf(),
        code: -1,
    })
}

/// A bare file name would be looked up in `PATH`; anchor it to the
/// current directory instead.
fn spawnable(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
        _ => Path::new(".").join(path),
    }
}
