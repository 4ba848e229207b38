// Integration tests for manifest generation
// Drives the library pipeline against temporary data directories

use anyhow::Result;
use idmanifest::commands;
use idmanifest::config::Config;
use idmanifest::error::ManifestError;
use idmanifest::manifest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Setup a project root with a data directory holding the given files
fn setup(files: &[&str]) -> Result<(TempDir, Config)> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("data");
    fs::create_dir(&data_dir)?;

    for name in files {
        fs::write(data_dir.join(name), "{\"ignored\": true}\n")?;
    }

    let config = Config {
        data_dir,
        manifest_file: temp_dir.path().join("manifest.json"),
    };
    Ok((temp_dir, config))
}

fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

#[test]
fn test_non_json_files_excluded() -> Result<()> {
    let (_temp, config) = setup(&["a.json", "b.json", "c.txt"])?;

    let manifest = commands::generate(&config)?;

    assert_eq!(manifest.ids(), ["a", "b"]);
    assert_eq!(read(&config.manifest_file)?, "[\n  \"a\",\n  \"b\"\n]");
    assert_eq!(
        commands::success_line(&config, &manifest),
        format!(
            "Successfully generated '{}' with 2 identifiers.",
            config.manifest_file.display()
        )
    );

    Ok(())
}

#[test]
fn test_empty_directory() -> Result<()> {
    let (_temp, config) = setup(&[])?;

    let manifest = commands::generate(&config)?;

    assert_eq!(manifest.len(), 0);
    assert_eq!(read(&config.manifest_file)?, "[]");

    Ok(())
}

#[test]
fn test_uppercase_sorts_first() -> Result<()> {
    let (_temp, config) = setup(&["banana.json", "Apple.json"])?;

    commands::generate(&config)?;

    let ids: Vec<String> = serde_json::from_str(&read(&config.manifest_file)?)?;
    assert_eq!(ids, vec!["Apple", "banana"]);

    Ok(())
}

#[test]
fn test_missing_data_dir_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = Config {
        data_dir: temp_dir.path().join("data"),
        manifest_file: temp_dir.path().join("manifest.json"),
    };

    let err = commands::generate(&config).unwrap_err();

    let lines = commands::error_report(&err);
    assert!(lines[0].contains("data"));
    assert!(lines[0].contains("not found"));
    assert!(!config.manifest_file.exists());
    assert!(!config.data_dir.exists());

    Ok(())
}

#[test]
fn test_unlistable_data_dir_is_reported_as_unexpected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = Config {
        data_dir: temp_dir.path().join("data"),
        manifest_file: temp_dir.path().join("manifest.json"),
    };
    // A regular file where the directory should be
    fs::write(&config.data_dir, "not a directory")?;

    let err = commands::generate(&config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::ReadDir { .. })
    ));
    let lines = commands::error_report(&err);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("An error occurred: "));
    assert!(lines[0].contains(&config.data_dir.display().to_string()));
    assert!(!config.manifest_file.exists());

    Ok(())
}

#[test]
fn test_missing_data_dir_keeps_previous_manifest() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = Config {
        data_dir: temp_dir.path().join("data"),
        manifest_file: temp_dir.path().join("manifest.json"),
    };
    fs::write(&config.manifest_file, "[\n  \"old\"\n]")?;

    assert!(manifest::generate(&config.data_dir, &config.manifest_file).is_err());
    assert_eq!(read(&config.manifest_file)?, "[\n  \"old\"\n]");

    Ok(())
}

#[test]
fn test_idempotent() -> Result<()> {
    let (_temp, config) = setup(&["zeta.json", "alpha.json", "mid.json", "readme.md"])?;

    commands::generate(&config)?;
    let first = fs::read(&config.manifest_file)?;
    commands::generate(&config)?;
    let second = fs::read(&config.manifest_file)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_bare_suffix_excluded() -> Result<()> {
    let (_temp, config) = setup(&[".json", "item.json"])?;

    let manifest = commands::generate(&config)?;

    assert_eq!(manifest.ids(), ["item"]);

    Ok(())
}

#[test]
fn test_non_ascii_written_verbatim() -> Result<()> {
    let (_temp, config) = setup(&["日本.json", "abc.json"])?;

    commands::generate(&config)?;

    assert_eq!(read(&config.manifest_file)?, "[\n  \"abc\",\n  \"日本\"\n]");

    Ok(())
}

#[test]
fn test_check_after_generate_is_clean() -> Result<()> {
    let (_temp, config) = setup(&["a.json", "b.json"])?;

    commands::generate(&config)?;
    let manifest = commands::check(&config)?;

    assert_eq!(manifest.len(), 2);

    Ok(())
}

#[test]
fn test_check_detects_new_file_without_writing() -> Result<()> {
    let (_temp, config) = setup(&["a.json"])?;
    commands::generate(&config)?;
    let before = read(&config.manifest_file)?;

    fs::write(config.data_dir.join("b.json"), "{}")?;
    let outcome = manifest::check(&config.data_dir, &config.manifest_file)?;

    assert!(!outcome.up_to_date);
    assert_eq!(outcome.diff.added, vec!["b".to_string()]);
    assert!(outcome.diff.removed.is_empty());
    assert_eq!(read(&config.manifest_file)?, before);

    let err = commands::check(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::Stale { added: 1, removed: 0, .. })
    ));

    Ok(())
}

#[test]
fn test_check_missing_manifest() -> Result<()> {
    let (_temp, config) = setup(&["a.json"])?;

    let err = commands::check(&config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::MissingManifest { .. })
    ));
    assert!(!config.manifest_file.exists());

    Ok(())
}
