use ahash::AHashMap;
use tracing::{debug, info, warn};

use crate::{crosswalk::{CrosswalkRow, IntersectionRecord}, error::Result, layer::BoundaryLayer};

/// Full (un-clipped) region area keyed by city identifier.
///
/// When several regions share a city identifier the last one in layer order wins.
#[derive(Debug, Clone, Default)]
pub struct AreaLookup {
    areas: AHashMap<String, f64>,
    duplicates: usize,
}

impl AreaLookup {
    pub fn from_layer(layer: &BoundaryLayer) -> Result<Self> {
        let mut areas = AHashMap::with_capacity(layer.len());
        let mut duplicates = 0usize;
        for (ids, area) in layer.ids()?.into_iter().zip(layer.geoms.areas()) {
            if areas.insert(ids.city, area).is_some() { duplicates += 1 }
        }
        if duplicates > 0 {
            warn!("{duplicates} regions in the {} layer repeat a city identifier; last area kept.", layer.year);
        }
        Ok(Self { areas, duplicates })
    }

    #[inline]
    pub fn get(&self, city: &str) -> Option<f64> { self.areas.get(city).copied() }

    /// Regions whose area was overwritten by a later region with the same city.
    #[inline] pub fn duplicates(&self) -> usize { self.duplicates }

    #[inline] pub fn len(&self) -> usize { self.areas.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.areas.is_empty() }
}

/// Data-quality counts from one weighting pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct WeightStats {
    pub missing_source_area: usize,
    pub missing_target_area: usize,
    pub non_finite_weights: usize,
    pub duplicate_source_cities: usize,
    pub duplicate_target_cities: usize,
}

/// Attach `weight = intersection_area / target_area` to every record, then drop the
/// geometry and area payload. Missing or zero target areas give weight 0.
pub fn compute_weights(
    records: Vec<IntersectionRecord>,
    source: &BoundaryLayer,
    target: &BoundaryLayer,
) -> Result<(Vec<CrosswalkRow>, WeightStats)> {
    info!("Calculating weights...");
    let source_areas = AreaLookup::from_layer(source)?;
    let target_areas = AreaLookup::from_layer(target)?;

    let mut stats = WeightStats {
        duplicate_source_cities: source_areas.duplicates(),
        duplicate_target_cities: target_areas.duplicates(),
        ..WeightStats::default()
    };
    let rows = records.into_iter()
        .map(|record| {
            let source_area = source_areas.get(&record.source.city);
            let target_area = target_areas.get(&record.target.city);
            if source_area.is_none() {
                stats.missing_source_area += 1;
                debug!("source region {} ({:?}) has no area", record.source_idx, record.source.city);
            }
            if target_area.is_none() {
                stats.missing_target_area += 1;
                debug!("target region {} ({:?}) has no area", record.target_idx, record.target.city);
            }

            let weight = record.area / target_area.unwrap_or(f64::NAN);
            let weight = if weight.is_finite() { weight } else {
                stats.non_finite_weights += 1;
                debug!("weight for source region {} x target region {} is {weight}; set to 0", record.source_idx, record.target_idx);
                0.0
            };

            CrosswalkRow { source: record.source, target: record.target, weight }
        })
        .collect::<Vec<_>>();

    if stats.missing_source_area > 0 {
        warn!("{} source cities not found in area lookup.", stats.missing_source_area);
    }
    if stats.missing_target_area > 0 {
        warn!("{} target cities not found in area lookup.", stats.missing_target_area);
    }
    if stats.non_finite_weights > 0 {
        warn!("{} rows have invalid weights (NaN or Inf); set to 0.", stats.non_finite_weights);
    }

    Ok((rows, stats))
}
