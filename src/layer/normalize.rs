use tracing::info;

use crate::{error::{CrosswalkError, Result}, layer::BoundaryLayer};

/// Bring `target` into the reference system of `source`. A layer already in the
/// same system comes back untouched; the source layer is never reprojected.
pub fn normalize(source: &BoundaryLayer, target: BoundaryLayer) -> Result<BoundaryLayer> {
    if source.crs.matches(&target.crs) {
        return Ok(target);
    }

    info!("CRS mismatch: {} vs {}", source.crs, target.crs);
    info!("Converting {} layer to {}...", target.year, source.crs);

    let geoms = target.geoms.reproject(&target.crs, &source.crs)
        .map_err(|e| match e {
            CrosswalkError::Crs(msg) => CrosswalkError::Crs(format!("{} layer: {msg}", target.year)),
            other => other,
        })?;
    let crs = source.crs.clone();
    Ok(target.with_geoms(geoms, crs))
}
