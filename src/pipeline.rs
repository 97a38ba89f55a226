use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::CrosswalkConfig,
    crosswalk::{apply_threshold, compute_weights, intersect, Crosswalk, FilterStats, WeightStats},
    error::Result,
    layer::{normalize, BoundaryLayer},
};

/// Summary of one crosswalk run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub source_year: u16,
    pub target_year: u16,
    pub source_regions: usize,
    pub target_regions: usize,
    /// Whether the target layer had to be moved into the source reference system.
    pub reprojected: bool,
    pub intersections: usize,
    pub weights: WeightStats,
    pub filter: FilterStats,
    pub output_path: Option<PathBuf>,
}

/// Build the crosswalk from two loaded layers without touching the filesystem.
pub fn build_crosswalk(
    source: &BoundaryLayer,
    target: BoundaryLayer,
    weight_threshold: f64,
) -> Result<(Crosswalk, RunReport)> {
    let mut report = RunReport {
        source_year: source.year,
        target_year: target.year,
        source_regions: source.len(),
        target_regions: target.len(),
        reprojected: !source.crs.matches(&target.crs),
        ..RunReport::default()
    };

    let target = normalize(source, target)?;
    let records = intersect(source, &target)?;
    report.intersections = records.len();

    let (rows, weights) = compute_weights(records, source, &target)?;
    report.weights = weights;

    let (rows, filter) = apply_threshold(rows, weight_threshold);
    report.filter = filter;
    debug!("{report:?}");

    let crosswalk = Crosswalk {
        source_year: source.year,
        target_year: target.year,
        source_has_gun: source.has_gun(),
        target_has_gun: target.has_gun(),
        rows,
    };
    Ok((crosswalk, report))
}

/// Load both vintages, build the crosswalk and write it to the configured output path.
pub fn run(config: &CrosswalkConfig) -> Result<RunReport> {
    config.validate()?;

    let source = BoundaryLayer::from_shapefile(config.source_year, &config.source_path())?;
    let target = BoundaryLayer::from_shapefile(config.target_year, &config.target_path())?;

    let (crosswalk, mut report) = build_crosswalk(&source, target, config.weight_threshold)?;

    let output = config.output_path();
    crosswalk.write(&output)?;
    info!("Saved crosswalk to {}", output.display());

    report.output_path = Some(output);
    Ok(report)
}
