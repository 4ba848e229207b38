//! Manifest model and generation pipeline
//!
//! Pipeline: list the data directory, derive identifiers from `*.json` names,
//! sort, render as a pretty JSON array, and write atomically.

pub mod scan;
pub mod writer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ManifestError, Result};

pub use scan::{scan_dir, ScanReport, SkipReason, SkippedEntry};
pub use writer::{read_manifest, write_manifest};

/// Suffix that marks an item file. Used both to filter entries and to
/// truncate them into identifiers.
pub const JSON_SUFFIX: &str = ".json";

/// Derive an identifier from a directory entry name.
///
/// Returns `None` when the name does not end with [`JSON_SUFFIX`]. A name of
/// exactly `.json` yields `Some("")`; callers decide what to do with it.
pub fn identifier_for(name: &str) -> Option<&str> {
    if !name.ends_with(JSON_SUFFIX) {
        return None;
    }
    Some(&name[..name.len() - JSON_SUFFIX.len()])
}

/// Sorted list of identifiers, serialized as a plain JSON array of strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    ids: Vec<String>,
}

impl Manifest {
    /// Build a manifest, sorting identifiers in ascending byte order
    pub fn from_unsorted(mut ids: Vec<String>) -> Self {
        ids.sort();
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Render with two-space indentation and no trailing newline
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.ids)?)
    }

    /// Identifiers present in `self` but not in `older`, and vice versa
    pub fn diff(&self, older: &Manifest) -> ManifestDiff {
        let new: BTreeSet<&str> = self.ids.iter().map(String::as_str).collect();
        let old: BTreeSet<&str> = older.ids.iter().map(String::as_str).collect();

        ManifestDiff {
            added: new.difference(&old).map(|s| s.to_string()).collect(),
            removed: old.difference(&new).map(|s| s.to_string()).collect(),
        }
    }
}

/// Difference between a freshly computed manifest and one on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Scan `data_dir` and build the manifest without touching the output file
pub fn build(data_dir: &Path) -> Result<Manifest> {
    let report = scan_dir(data_dir)?;

    for skipped in &report.skipped {
        match skipped.reason {
            SkipReason::NotAFile => {
                debug!("Skipping {:?}: not a regular file", skipped.name)
            }
            SkipReason::NonUtf8Name => {
                warn!("Skipping {:?}: file name is not valid UTF-8", skipped.name)
            }
            SkipReason::EmptyIdentifier => {
                warn!("Skipping {:?}: identifier would be empty", skipped.name)
            }
        }
    }

    Ok(report.manifest)
}

/// Scan `data_dir` and overwrite `output` with the rendered manifest
pub fn generate(data_dir: &Path, output: &Path) -> Result<Manifest> {
    let manifest = build(data_dir)?;
    write_manifest(output, &manifest)?;
    info!("Wrote {} identifiers to {:?}", manifest.len(), output);
    Ok(manifest)
}

/// Result of comparing the computed manifest against the one on disk
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub manifest: Manifest,
    pub diff: ManifestDiff,
    /// Bytes on disk equal what `generate` would write
    pub up_to_date: bool,
}

/// Compare `output` with what [`generate`] would write. Never writes.
pub fn check(data_dir: &Path, output: &Path) -> Result<CheckOutcome> {
    let manifest = build(data_dir)?;
    let rendered = manifest.to_json_string()?;

    let existing = read_manifest(output)?.ok_or_else(|| ManifestError::MissingManifest {
        path: output.to_path_buf(),
    })?;

    if existing == rendered {
        return Ok(CheckOutcome {
            manifest,
            diff: ManifestDiff::default(),
            up_to_date: true,
        });
    }

    // A file we cannot parse counts as an empty manifest.
    let on_disk: Manifest = serde_json::from_str(&existing).unwrap_or_else(|e| {
        warn!("Existing manifest {:?} is not a JSON string array: {}", output, e);
        Manifest::default()
    });
    let diff = manifest.diff(&on_disk);

    Ok(CheckOutcome {
        manifest,
        diff,
        up_to_date: false,
    })
}
