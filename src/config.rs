use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CrosswalkError, Result};

/// Minimum weight kept in a crosswalk unless configured otherwise.
pub const DEFAULT_WEIGHT_THRESHOLD: f64 = 0.001;

/// Default location of a boundary layer for `year`, relative to `root`.
pub fn default_layer_path(root: &Path, year: u16) -> PathBuf {
    root.join("Data")
        .join(format!("jpn{year}"))
        .join(format!("jpn{year}geo.shp"))
}

/// Default location of the crosswalk table for a (source, target) pair, relative to `root`.
pub fn default_output_path(root: &Path, source_year: u16, target_year: u16) -> PathBuf {
    root.join("Crosswalk")
        .join(format!("Crosswalk_{source_year}_{target_year}.csv"))
}

/// Everything one crosswalk run needs to know.
/// Deserializes from partial documents; absent fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswalkConfig {
    pub source_year: u16,
    pub target_year: u16,
    pub source_path: Option<PathBuf>,
    pub target_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub weight_threshold: f64,
    /// Directory that default paths and relative output paths resolve against.
    pub root: PathBuf,
}

impl Default for CrosswalkConfig {
    fn default() -> Self {
        Self {
            source_year: 2000,
            target_year: 1980,
            source_path: None,
            target_path: None,
            output_path: None,
            weight_threshold: DEFAULT_WEIGHT_THRESHOLD,
            root: PathBuf::from("."),
        }
    }
}

impl CrosswalkConfig {
    pub fn new(source_year: u16, target_year: u16) -> Self {
        Self { source_year, target_year, ..Self::default() }
    }

    /// Reject thresholds that would make the filter meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.weight_threshold.is_finite() || self.weight_threshold < 0.0 {
            return Err(CrosswalkError::Invalid(format!(
                "weight threshold must be a finite non-negative number, got {}",
                self.weight_threshold
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn source_path(&self) -> PathBuf {
        self.source_path.clone()
            .unwrap_or_else(|| default_layer_path(&self.root, self.source_year))
    }

    #[inline]
    pub fn target_path(&self) -> PathBuf {
        self.target_path.clone()
            .unwrap_or_else(|| default_layer_path(&self.root, self.target_year))
    }

    /// Explicit output paths that are relative are taken relative to `root`.
    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.root.join(path),
            None => default_output_path(&self.root, self.source_year, self.target_year),
        }
    }
}
