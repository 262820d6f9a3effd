//! TOML configuration file support.
//!
//! Instead of repeating tolerance flags on every run, settings can live in a
//! config file. Command-line flags take precedence over the file:
//!
//! ```toml
//! # mztarget.toml
//! [tolerance]
//! mass_tolerance = 0.002
//! default_retime_tolerance = 0.5
//!
//! [matching]
//! strategy = "indexed"
//!
//! [output]
//! format = "parquet"
//! path = "identified_compounds.parquet"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use mztarget::matcher::MatchStrategy;
use mztarget::output::OutputFormat;
use mztarget::tolerance::ToleranceConfig;

/// Root configuration structure for mztarget.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Tolerance windows.
    #[serde(default)]
    pub tolerance: ToleranceSection,

    /// Matching settings.
    #[serde(default)]
    pub matching: MatchingSection,

    /// Result file settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// Tolerance windows; unset keys fall back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ToleranceSection {
    /// m/z tolerance in Da.
    pub mass_tolerance: Option<f64>,

    /// Retention time tolerance in minutes for targets without their own.
    pub default_retime_tolerance: Option<f64>,
}

/// Matching settings.
#[derive(Debug, Default, Deserialize)]
pub struct MatchingSection {
    /// Evaluation strategy (dense or indexed).
    pub strategy: Option<MatchStrategy>,
}

/// Result file settings.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Result file format (csv, json or parquet).
    pub format: Option<OutputFormat>,

    /// Result file path.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Tolerances with precedence flag > file > default.
    pub fn resolve_tolerance(
        &self,
        mass_tolerance: Option<f64>,
        time_tolerance: Option<f64>,
    ) -> ToleranceConfig {
        let defaults = ToleranceConfig::default();
        ToleranceConfig {
            mass_tolerance: mass_tolerance
                .or(self.tolerance.mass_tolerance)
                .unwrap_or(defaults.mass_tolerance),
            default_retime_tolerance: time_tolerance
                .or(self.tolerance.default_retime_tolerance)
                .unwrap_or(defaults.default_retime_tolerance),
        }
    }
}
