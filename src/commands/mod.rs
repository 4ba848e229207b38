//! CLI commands for idmanifest

use anyhow::Result;

use crate::config::Config;
use crate::error::ManifestError;
use crate::manifest::{self, Manifest};

/// Scan the data directory and write the manifest
pub fn generate(config: &Config) -> Result<Manifest> {
    let manifest = manifest::generate(&config.data_dir, &config.manifest_file)?;

    println!("{}", success_line(config, &manifest));

    Ok(manifest)
}

/// Status line printed after a successful `generate`
pub fn success_line(config: &Config, manifest: &Manifest) -> String {
    format!(
        "Successfully generated '{}' with {} identifiers.",
        config.manifest_file.display(),
        manifest.len()
    )
}

/// Verify the manifest on disk is current without writing it
pub fn check(config: &Config) -> Result<Manifest> {
    let outcome = manifest::check(&config.data_dir, &config.manifest_file)?;

    if outcome.up_to_date {
        println!(
            "'{}' is up to date ({} identifiers).",
            config.manifest_file.display(),
            outcome.manifest.len()
        );
        return Ok(outcome.manifest);
    }

    for id in &outcome.diff.added {
        println!("  + {}", id);
    }
    for id in &outcome.diff.removed {
        println!("  - {}", id);
    }
    if outcome.diff.is_empty() {
        println!("  (formatting differs)");
    }

    Err(ManifestError::Stale {
        path: config.manifest_file.clone(),
        added: outcome.diff.added.len(),
        removed: outcome.diff.removed.len(),
    }
    .into())
}

/// User-facing lines for a failed run
pub fn error_report(err: &anyhow::Error) -> Vec<String> {
    match err.downcast_ref::<ManifestError>() {
        Some(ManifestError::MissingInputDirectory { path, .. }) => vec![
            format!("Error: Data directory '{}' not found.", path.display()),
            "Make sure you are running this from the root of your project directory, \
             or pass --data-dir."
                .to_string(),
        ],
        Some(e @ ManifestError::Stale { .. }) | Some(e @ ManifestError::MissingManifest { .. }) => {
            vec![
                format!("Error: {}.", e),
                "Run `idmanifest generate` to update it.".to_string(),
            ]
        }
        Some(e @ ManifestError::InvalidConfig { .. }) => vec![format!("Error: {}", e)],
        _ => vec![format!("An error occurred: {}", err)],
    }
}
