//! Results of a run: what happened to the child and to the artifact.

use crate::config::ExitPolicy;
use crate::error::ChildError;
use std::path::PathBuf;

/// How the child process ended.
#[derive(Debug)]
pub enum ChildOutcome {
    /// Exited with status 0.
    Success,
    /// Did not start, or did not exit cleanly.
    Failed(ChildError),
}

impl ChildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ChildOutcome::Success)
    }

    /// The child failure, if any.
    pub fn error(&self) -> Option<&ChildError> {
        match self {
            ChildOutcome::Success => None,
            ChildOutcome::Failed(e) => Some(e),
        }
    }

    /// Exit code the wrapper should report under `policy`.
    pub fn exit_code(&self, policy: ExitPolicy) -> u8 {
        let err = match (policy, self) {
            (ExitPolicy::Report, _) | (_, ChildOutcome::Success) => return 0,
            (ExitPolicy::Propagate, ChildOutcome::Failed(e)) => e,
        };
        match err {
            // Unix statuses are already 0–255; anything else is clamped.
            ChildError::NonZeroExit { code, .. } => u8::try_from(*code).unwrap_or(1),
            ChildError::Signaled { signal, .. } => {
                u8::try_from(128 + *signal).unwrap_or(u8::MAX)
            }
            ChildError::SpawnFailed { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    127
                } else {
                    126
                }
            }
        }
    }
}

/// Everything known about one completed run.
///
/// Only produced when the artifact was materialised; earlier failures are
/// returned as [`crate::error::ElfExecError`] instead.
#[derive(Debug)]
pub struct RunReport {
    /// Input path; `None` when the run started from a byte buffer.
    pub source: Option<PathBuf>,
    /// Size of the raw payload in bytes.
    pub payload_len: usize,
    /// Size of the base64 form in bytes.
    pub encoded_len: usize,
    /// Where the artifact lived while the child ran.
    pub temp_path: PathBuf,
    pub outcome: ChildOutcome,
    /// `false` if removing the artifact failed.
    pub cleaned_up: bool,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn exit_code(&self, policy: ExitPolicy) -> u8 {
        self.outcome.exit_code(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(err: ChildError) -> ChildOutcome {
        ChildOutcome::Failed(err)
    }

    #[test]
    fn report_policy_always_exits_zero() {
        let outcomes = [
            ChildOutcome::Success,
            failed(ChildError::NonZeroExit {
                path: "x".into(),
                code: 3,
            }),
            failed(ChildError::SpawnFailed {
                path: "x".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        ];
        for o in &outcomes {
            assert_eq!(o.exit_code(ExitPolicy::Report), 0, "{o:?}");
        }
    }

    #[test]
    fn propagate_policy_maps_child_status() {
        assert_eq!(ChildOutcome::Success.exit_code(ExitPolicy::Propagate), 0);
        let exit3 = failed(ChildError::NonZeroExit {
            path: "x".into(),
            code: 3,
        });
        assert_eq!(exit3.exit_code(ExitPolicy::Propagate), 3);
        let killed = failed(ChildError::Signaled {
            path: "x".into(),
            signal: 9,
        });
        assert_eq!(killed.exit_code(ExitPolicy::Propagate), 137);
    }

    #[test]
    fn propagate_policy_maps_spawn_failures_shell_style() {
        let missing = failed(ChildError::SpawnFailed {
            path: "x".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(missing.exit_code(ExitPolicy::Propagate), 127);
        let denied = failed(ChildError::SpawnFailed {
            path: "x".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(denied.exit_code(ExitPolicy::Propagate), 126);
    }

    #[test]
    fn out_of_range_code_is_clamped() {
        let weird = failed(ChildError::NonZeroExit {
            path: "x".into(),
            code: -1,
        });
        assert_eq!(weird.exit_code(ExitPolicy::Propagate), 1);
    }

    #[test]
    fn error_accessor() {
        assert!(ChildOutcome::Success.error().is_none());
        assert!(ChildOutcome::Success.is_success());
        let o = failed(ChildError::Signaled {
            path: "x".into(),
            signal: 15,
        });
        assert!(!o.is_success());
        assert!(matches!(o.error(), Some(ChildError::Signaled { signal: 15, .. })));
    }
}
