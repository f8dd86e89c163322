//! The TOML run configuration.
//!
//! Everything a run needs is supplied up front in one file: the API key, the
//! ordered ISBN list, the fields to keep, the inter-request delay, and the
//! output locations.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{ensure, WrapErr};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// ISBNdb REST key, sent with every lookup.
    pub api_key: String,
    /// Ordered list of ISBNs to process.
    pub isbns: Vec<String>,
    /// Record fields written to the report, in column order.
    pub desired_tags: Vec<String>,
    /// Pause between items, respecting the API's rate limits.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Directory for downloaded covers; covers are skipped when absent.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
    /// The CSV report path, truncated at run start.
    pub output_file: PathBuf,
}

const fn default_delay_ms() -> u64 {
    1000
}

/// Loads and validates the run configuration at `path`.
///
/// # Errors
///
/// An `Err` is returned when the file cannot be read or parsed, or when the
/// API key or desired-tags list is empty.
pub fn load(path: &Path) -> eyre::Result<Config> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Cannot read the run configuration file '{}'", path.display()))?;

    let config: Config = toml::from_str(&raw)
        .wrap_err_with(|| format!("Cannot parse the run configuration file '{}'", path.display()))?;

    ensure!(
        !config.api_key.is_empty(),
        "'api_key' must not be empty in '{}'",
        path.display()
    );
    ensure!(
        !config.desired_tags.is_empty(),
        "'desired_tags' must name at least one field in '{}'",
        path.display()
    );

    Ok(config)
}
