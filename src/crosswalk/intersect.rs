use tracing::{info, warn};

use crate::{crosswalk::IntersectionRecord, error::Result, layer::BoundaryLayer};

/// Overlay two layers that share a reference system. Every returned record pairs exactly
/// one source region with one target region; an empty result is not an error.
pub fn intersect(source: &BoundaryLayer, target: &BoundaryLayer) -> Result<Vec<IntersectionRecord>> {
    info!("Calculating intersections between {} and {} boundaries...", source.year, target.year);

    let overlaps = source.geoms.overlay(&target.geoms)?;
    if overlaps.is_empty() {
        warn!("No intersections found between {} and {} boundaries.", source.year, target.year);
        return Ok(Vec::new());
    }

    let source_ids = source.ids()?;
    let target_ids = target.ids()?;

    let records = overlaps.into_iter()
        .map(|overlap| IntersectionRecord {
            source_idx: overlap.source,
            target_idx: overlap.target,
            source: source_ids[overlap.source].clone(),
            target: target_ids[overlap.target].clone(),
            geometry: overlap.geometry,
            area: overlap.area,
        })
        .collect::<Vec<_>>();

    info!("Found {} intersections.", records.len());
    Ok(records)
}
