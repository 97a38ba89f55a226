mod filter;
mod intersect;
mod weights;
mod write;

use geo::MultiPolygon;

use crate::layer::RegionIds;

pub use filter::{apply_threshold, FilterStats};
pub use intersect::intersect;
pub use weights::{compute_weights, AreaLookup, WeightStats};

/// A non-negligible overlap between one source region and one target region.
#[derive(Debug, Clone)]
pub struct IntersectionRecord {
    pub source_idx: usize,
    pub target_idx: usize,
    pub source: RegionIds,
    pub target: RegionIds,
    pub geometry: MultiPolygon<f64>,
    pub area: f64,
}

/// One output row: both identifier sets and the share of the target region's area
/// covered by the pair's overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosswalkRow {
    pub source: RegionIds,
    pub target: RegionIds,
    pub weight: f64,
}

/// The crosswalk table between two vintages. Geometry never reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Crosswalk {
    pub source_year: u16,
    pub target_year: u16,
    pub source_has_gun: bool,
    pub target_has_gun: bool,
    pub rows: Vec<CrosswalkRow>,
}

impl Crosswalk {
    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
