//! Column layout of the numeric data block.
//!
//! The layout is always supplied by the caller; it is never guessed from the
//! file. Names are normalized to lower case, and the common aliases for the
//! four core columns collapse to `lat`, `lon`, `depth` and `slip`.

use crate::error::{FspError, FspResult};

/// Column names of the standard 10-column finite-source body.
pub const DEFAULT_COLUMNS: [&str; 10] = [
    "lat", "lon", "x_ew", "y_ns", "z", "slip", "rake", "trup", "rise", "sf_moment",
];

/// Columns every layout must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["lat", "lon", "depth", "slip"];

/// Normalize a declared column name to the key used for its grid.
pub fn normalize_column(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.as_str() {
        "latitude" => "lat".to_string(),
        "longitude" => "lon".to_string(),
        "z" | "dep" | "depth" | "z==depth" => "depth".to_string(),
        "x==ew" => "x_ew".to_string(),
        "y==ns" => "y_ns".to_string(),
        _ => lower,
    }
}

/// Ordered mapping from data-row column to field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    names: Vec<String>,
}

impl ColumnLayout {
    /// Build a layout from declared column names.
    pub fn new<I, S>(names: I) -> FspResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| normalize_column(name.as_ref()))
            .collect();

        if let Some(empty) = names.iter().position(|n| n.is_empty()) {
            return Err(FspError::InvalidLayout(format!(
                "column {} has an empty name",
                empty
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(FspError::InvalidLayout(format!(
                    "column '{}' declared twice",
                    name
                )));
            }
        }
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|n| n == required) {
                return Err(FspError::InvalidLayout(format!(
                    "missing required column '{}'",
                    required
                )));
            }
        }
        Ok(Self { names })
    }

    /// Number of columns every data row must have.
    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            names: DEFAULT_COLUMNS.iter().map(|n| normalize_column(n)).collect(),
        }
    }
}
