//! Directory scanning
//!
//! Lists the data directory (non-recursive) and turns `*.json` file names
//! into identifiers. File contents are never read.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use super::{identifier_for, Manifest, JSON_SUFFIX};
use crate::error::{ManifestError, Result};

/// Why a `*.json` entry did not make it into the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Directory, broken symlink, or other non-regular entry
    NotAFile,
    NonUtf8Name,
    /// The entry is named exactly `.json`
    EmptyIdentifier,
}

#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub name: OsString,
    pub reason: SkipReason,
}

/// Manifest plus the suffix-matching entries that were left out
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub manifest: Manifest,
    pub skipped: Vec<SkippedEntry>,
}

/// Scan `dir` for item files.
///
/// A missing directory is reported as [`ManifestError::MissingInputDirectory`]
/// and is never created.
pub fn scan_dir(dir: &Path) -> Result<ScanReport> {
    let entries = fs::read_dir(dir).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ManifestError::MissingInputDirectory {
            path: dir.to_path_buf(),
            source,
        },
        _ => ManifestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        },
    })?;

    let mut ids = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();

        let Some(name_str) = name.to_str() else {
            if name.to_string_lossy().ends_with(JSON_SUFFIX) {
                skipped.push(SkippedEntry {
                    name,
                    reason: SkipReason::NonUtf8Name,
                });
            }
            continue;
        };

        let Some(id) = identifier_for(name_str) else {
            continue;
        };

        // fs::metadata follows symlinks, so a link to a regular file counts.
        // Only a dangling link is a quiet skip; other stat failures abort.
        let is_file = match fs::metadata(entry.path()) {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                return Err(ManifestError::ReadDir {
                    path: entry.path(),
                    source,
                })
            }
        };
        if !is_file {
            skipped.push(SkippedEntry {
                name,
                reason: SkipReason::NotAFile,
            });
            continue;
        }

        if id.is_empty() {
            skipped.push(SkippedEntry {
                name,
                reason: SkipReason::EmptyIdentifier,
            });
            continue;
        }

        ids.push(id.to_string());
    }

    Ok(ScanReport {
        manifest: Manifest::from_unsorted(ids),
        skipped,
    })
}
