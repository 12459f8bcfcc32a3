//! Materialisation: decoded bytes → executable temporary file.
//!
//! The artifact is created with `tempfile`'s create-exclusive primitive, so
//! the random name cannot be pre-created or swapped for a symlink between
//! choosing it and opening it. The write handle is closed before the path is
//! handed out; Linux refuses to exec a file that is still open for writing.
//!
//! Ownership of the path lives in a [`tempfile::TempPath`]: whichever way the
//! run ends, dropping [`Materialized`] removes the file.

use crate::config::RunConfig;
use crate::error::ElfExecError;
use std::io::{self, Write};
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, warn};

/// An executable artifact on disk, removed when dropped.
#[derive(Debug)]
pub struct Materialized {
    path: TempPath,
}

impl Materialized {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the artifact now and report whether that worked.
    ///
    /// A file that is already gone (the child may have unlinked itself)
    /// counts as removed.
    pub fn cleanup(self) -> io::Result<()> {
        let shown = self.path.to_path_buf();
        match self.path.close() {
            Ok(()) => {
                debug!("Removed {}", shown.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("Failed to remove {}: {}", shown.display(), e);
                Err(e)
            }
        }
    }
}

/// Write `bytes` to a fresh temp file and make it executable.
///
/// On failure the partially written file is removed before the error is
/// returned.
pub fn materialize(bytes: &[u8], config: &RunConfig) -> Result<Materialized, ElfExecError> {
    let dir = config.resolved_temp_dir();

    let mut file = tempfile::Builder::new()
        .prefix(&config.temp_prefix)
        .tempfile_in(&dir)
        .map_err(|source| ElfExecError::MaterializeFailed {
            dir: dir.clone(),
            source,
        })?;

    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|source| ElfExecError::MaterializeFailed {
            dir: dir.clone(),
            source,
        })?;

    set_mode(&file, config.mode).map_err(|source| ElfExecError::SetPermissionsFailed {
        path: file.path().to_path_buf(),
        source,
    })?;

    let path = file.into_temp_path();
    debug!(
        "Materialised {} bytes at {} (mode {:#o})",
        bytes.len(),
        path.display(),
        config.mode
    );
    Ok(Materialized { path })
}

#[cfg(unix)]
fn set_mode(file: &NamedTempFile, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file()
        .set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &NamedTempFile, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> RunConfig {
        RunConfig::builder().temp_dir(dir).build().unwrap()
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn writes_exact_bytes_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let payload: Vec<u8> = (0..=255u8).collect();

        let artifact = materialize(&payload, &config_in(dir.path())).unwrap();
        assert_eq!(artifact.path().parent(), Some(dir.path()));
        let name = artifact.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("elfexec-"), "got: {name}");
        assert_eq!(std::fs::read(artifact.path()).unwrap(), payload);
    }

    #[cfg(unix)]
    #[test]
    fn mode_is_applied() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();

        let artifact = materialize(b"x", &config_in(dir.path())).unwrap();
        let mode = std::fs::metadata(artifact.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o755);

        let config = RunConfig::builder()
            .temp_dir(dir.path())
            .mode(0o700)
            .build()
            .unwrap();
        let owner_only = materialize(b"x", &config).unwrap();
        let mode = std::fs::metadata(owner_only.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o700);
    }

    #[test]
    fn names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let a = materialize(b"a", &config).unwrap();
        let b = materialize(b"b", &config).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn drop_removes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = materialize(b"x", &config_in(dir.path())).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());
        drop(artifact);
        assert!(!path.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn cleanup_removes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = materialize(b"x", &config_in(dir.path())).unwrap();
        let path = artifact.path().to_path_buf();
        artifact.cleanup().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn cleanup_tolerates_already_removed_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = materialize(b"x", &config_in(dir.path())).unwrap();
        std::fs::remove_file(artifact.path()).unwrap();
        artifact.cleanup().expect("missing file counts as removed");
    }

    #[test]
    fn missing_directory_is_materialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = materialize(b"x", &config_in(&missing)).unwrap_err();
        match err {
            ElfExecError::MaterializeFailed { dir: d, .. } => assert_eq!(d, missing),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(entries(dir.path()), 0);
    }
}
