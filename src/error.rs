use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a crosswalk run. Data-quality problems are not errors; they are
/// counted in the run report and logged.
#[derive(Debug, Error)]
pub enum CrosswalkError {
    /// An input layer file does not exist.
    #[error("boundary layer not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A required identifying column is absent from a loaded layer.
    #[error("column '{column}' not found in boundary layer {}", path.display())]
    Schema { column: String, path: PathBuf },

    /// The geometry engine failed on a region or a (source, target) pair.
    #[error("overlay failed for {context}: {cause}")]
    Overlay { context: String, cause: String },

    /// Reference systems differ and at least one of them cannot be resolved.
    #[error("spatial reference error: {0}")]
    Crs(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("shapefile error in {}: {message}", path.display())]
    Shapefile { path: PathBuf, message: String },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrosswalkError>;
