//! File system utilities.

use crate::utils::hash;
use crate::Result;
use std::path::{Path, PathBuf};

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Move a file from one location to another.
///
/// Uses an atomic rename when possible. Across filesystems the file is
/// copied, the copy is verified by checksum, and only then is the source
/// removed.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => {
            tracing::debug!("Moved (rename): {:?} -> {:?}", from, to);
            return Ok(());
        }
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!("Cross-filesystem move detected, using copy+delete");
        }
        Err(e) => return Err(e.into()),
    }

    copy_then_remove(from, to)?;
    tracing::debug!("Moved (copy+delete): {:?} -> {:?}", from, to);
    Ok(())
}

/// Copy through a sibling `.partial` file, publish it under `to`, then
/// remove the source.
///
/// On failure exactly one complete copy remains: the source.
fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    let partial = partial_path(to);

    if let Err(e) = copy_verified(from, &partial) {
        let _ = std::fs::remove_file(&partial);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&partial, to) {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }

    if let Err(e) = std::fs::remove_file(from) {
        tracing::warn!("Could not remove source {:?}, undoing copy: {}", from, e);
        let _ = std::fs::remove_file(to);
        return Err(e.into());
    }

    Ok(())
}

fn copy_verified(from: &Path, to: &Path) -> Result<()> {
    let checksum = hash::sha256_file(from)?;
    std::fs::copy(from, to)?;

    if hash::sha256_file(to)? != checksum {
        return Err(crate::Error::ChecksumMismatch(to.display().to_string()));
    }
    Ok(())
}

/// Hidden sibling used while a copy is in flight.
fn partial_path(to: &Path) -> PathBuf {
    let name = to
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    to.with_file_name(format!(".{}.partial", name))
}

/// Check whether two paths name the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
