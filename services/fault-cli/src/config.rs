//! fault-cli configuration.
//!
//! Values resolve in order: defaults, then the YAML file given with
//! `--config`, then environment overrides, then command-line flags.

use anyhow::{Context, Result};
use fault_common::{ColorScale, ColorStop};
use fsp_parser::{ColumnLayout, DEFAULT_COLUMNS};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Column names of the numeric data block, in file order
    pub columns: Vec<String>,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Slip color stops over `0..=1`; the built-in palette when absent
    pub palette: Option<Vec<ColorStop>>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            pretty: false,
            palette: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `FSP_COLUMNS` and `FAULT_PRETTY_JSON` on top of this config.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(columns) = lookup("FSP_COLUMNS") {
            self.columns = split_columns(&columns);
        }
        if let Some(pretty) = lookup("FAULT_PRETTY_JSON") {
            self.pretty = matches!(pretty.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// Column layout for the parser.
    pub fn layout(&self) -> Result<ColumnLayout> {
        ColumnLayout::new(&self.columns).context("Invalid column layout")
    }

    /// Custom slip palette, if configured.
    pub fn palette_scale(&self) -> Result<Option<ColorScale>> {
        self.palette
            .clone()
            .map(|stops| ColorScale::new(stops).context("Invalid slip palette"))
            .transpose()
    }
}

/// Split a comma-separated column list, dropping blanks.
pub fn split_columns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
