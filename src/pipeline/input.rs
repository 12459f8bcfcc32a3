//! Input resolution: validate the user-supplied path and read it into memory.
//!
//! The whole file is read in one go; there is no streaming and no size cap.
//! The binary is treated as an opaque blob and never parsed.

use crate::error::ElfExecError;
use std::path::Path;
use tracing::debug;

/// Read the file at `path` as raw bytes.
///
/// Symlinks are followed. Anything that is not a regular file afterwards
/// (missing path, directory, socket, ...) is [`ElfExecError::NotFound`].
pub fn read_input(path: &Path) -> Result<Vec<u8>, ElfExecError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => {
            return Err(ElfExecError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    let bytes = std::fs::read(path).map_err(|source| ElfExecError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}
