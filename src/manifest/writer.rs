//! Manifest file I/O
//!
//! Writes go through a temp file in the destination directory and are renamed
//! into place, so the target holds either the old content or the full new one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use super::Manifest;
use crate::error::{ManifestError, Result};

/// Render `manifest` and atomically replace `path` with it.
///
/// If `path` is a symlink the file it points at is replaced and the link is
/// left in place.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let rendered = manifest.to_json_string()?;
    let write_err = |source: io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path).map_err(write_err)?;
    let parent = parent_dir(&target);
    let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(rendered.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // NamedTempFile is created 0600; keep the mode of the file being replaced.
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    debug!("Persisted {} bytes to {:?}", rendered.len(), target);
    Ok(())
}

/// Follow a symlinked output path to the file that should be replaced.
/// A dangling link resolves to its (possibly relative) destination.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let dest = fs::read_link(path)?;
                if dest.is_absolute() {
                    Ok(dest)
                } else {
                    Ok(parent_dir(path).join(dest))
                }
            }
            Err(e) => Err(e),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Read the current manifest text, or `None` if the file does not exist
pub fn read_manifest(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ManifestError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
