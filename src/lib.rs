//! idmanifest - Generate a sorted manifest of item identifiers
//!
//! Scans a directory of per-item `.json` files and writes a JSON array of the
//! identifiers (file names without the suffix).

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
