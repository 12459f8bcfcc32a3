//! Configuration types for a single materialise-and-run pass.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. The CLI maps its flags onto the builder; library
//! callers set only what they care about and rely on the defaults for the
//! rest.

use crate::error::ElfExecError;
use crate::observer::RunObserver;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default file-name prefix of the temporary artifact.
pub const DEFAULT_TEMP_PREFIX: &str = "elfexec-";

/// Default mode bits of the temporary artifact (`rwxr-xr-x`).
pub const DEFAULT_MODE: u32 = 0o755;

/// Owner execute bit; every accepted mode must carry it.
const OWNER_EXEC: u32 = 0o100;

/// Configuration for one run.
///
/// Built via [`RunConfig::builder()`] or using [`RunConfig::default()`].
///
/// # Example
/// ```rust
/// use elfexec::{ExitPolicy, RunConfig};
///
/// let config = RunConfig::builder()
///     .temp_dir("/tmp")
///     .exit_policy(ExitPolicy::Propagate)
///     .build()
///     .unwrap();
/// assert_eq!(config.mode, 0o755);
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Directory the temporary artifact is created in.
    /// If None, uses the platform temp directory.
    pub temp_dir: Option<PathBuf>,

    /// File-name prefix of the temporary artifact. Default: `elfexec-`.
    ///
    /// The rest of the name is random, so the prefix only needs to make
    /// leftovers recognisable.
    pub temp_prefix: String,

    /// Mode bits applied to the artifact before it is spawned. Default: 0755.
    /// Ignored on non-unix targets.
    pub mode: u32,

    /// How a failed child affects the wrapper's exit status.
    /// Default: [`ExitPolicy::Report`].
    pub exit_policy: ExitPolicy,

    /// Optional hook receiving per-stage events.
    pub observer: Option<Arc<dyn RunObserver>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            mode: DEFAULT_MODE,
            exit_policy: ExitPolicy::default(),
            observer: None,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("temp_dir", &self.temp_dir)
            .field("temp_prefix", &self.temp_prefix)
            .field("mode", &format_args!("{:#o}", self.mode))
            .field("exit_policy", &self.exit_policy)
            .field("observer", &self.observer.as_ref().map(|_| "<dyn RunObserver>"))
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }

    /// Directory the artifact will be created in, resolving the default.
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.temp_prefix = prefix.into();
        self
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.config.exit_policy = policy;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, ElfExecError> {
        let c = &self.config;
        if c.mode > 0o7777 {
            return Err(ElfExecError::InvalidConfig(format!(
                "mode must fit in 0o7777, got {:#o}",
                c.mode
            )));
        }
        if c.mode & OWNER_EXEC == 0 {
            return Err(ElfExecError::InvalidConfig(format!(
                "mode {:#o} does not let the owner execute the artifact",
                c.mode
            )));
        }
        if c.temp_prefix.contains(std::path::is_separator) {
            return Err(ElfExecError::InvalidConfig(format!(
                "temp prefix '{}' must not contain a path separator",
                c.temp_prefix
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// What the wrapper's own exit status says about a failed child.
///
/// | Policy | Child exit 0 | Child exit n | Signal n | Spawn failure |
/// |--------|--------------|--------------|----------|---------------|
/// | `Report` | 0 | 0 | 0 | 0 |
/// | `Propagate` | 0 | n | 128 + n | 127 not found, else 126 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Print the child failure and exit 0. (default)
    #[default]
    Report,
    /// Exit with the child's status, shell style.
    Propagate,
}
