use std::{any::Any, panic::{self, AssertUnwindSafe}};

use geo::{Area, BooleanOps, BoundingRect, Intersects, MultiPolygon};
use tracing::debug;

use crate::{error::{CrosswalkError, Result}, geom::{geom::is_finite, BoundingBox, Geometries}};

/// Intersections at or below this area are treated as floating-point noise from
/// shared edges and near-touching boundaries.
pub const NEGLIGIBLE_AREA: f64 = 1e-10;

/// One non-negligible overlap between a shape of `self` and a shape of `other`.
#[derive(Debug, Clone)]
pub struct Overlap {
    pub source: usize,
    pub target: usize,
    pub geometry: MultiPolygon<f64>,
    pub area: f64,
}

impl Geometries {
    /// Intersect every shape of `self` (in order) with the shapes of `other` whose bounding
    /// boxes it touches. Pairs that do not intersect, or whose intersection is empty or no
    /// larger than [`NEGLIGIBLE_AREA`], are skipped. Any geometry failure aborts the overlay.
    pub fn overlay(&self, other: &Geometries) -> Result<Vec<Overlap>> {
        if let Some(j) = other.shapes.iter().position(|shape| !is_finite(shape)) {
            return Err(CrosswalkError::Overlay {
                context: format!("target region {j}"),
                cause: "geometry has non-finite coordinates".to_string(),
            });
        }

        let total = self.len();
        let mut overlaps = Vec::new();

        for (i, shape) in self.shapes.iter().enumerate() {
            if i % 100 == 0 || i + 1 == total {
                debug!("Processing {}/{} source geometries...", i + 1, total);
            }

            if !is_finite(shape) {
                return Err(CrosswalkError::Overlay {
                    context: format!("source region {i}"),
                    cause: "geometry has non-finite coordinates".to_string(),
                });
            }
            let Some(rect) = shape.bounding_rect() else { continue };

            let mut candidates: Vec<usize> = other.query(&BoundingBox::aabb(&rect)).collect();
            candidates.sort_unstable();

            for j in candidates {
                let candidate = &other.shapes[j];

                let intersection = panic::catch_unwind(AssertUnwindSafe(|| {
                    shape.intersects(candidate).then(|| shape.intersection(candidate))
                })).map_err(|payload| CrosswalkError::Overlay {
                    context: format!("source region {i} x target region {j}"),
                    cause: panic_message(payload),
                })?;

                let Some(geometry) = intersection else { continue };
                if geometry.0.is_empty() { continue }

                let area = geometry.unsigned_area();
                if area <= NEGLIGIBLE_AREA { continue }

                overlaps.push(Overlap { source: i, target: j, geometry, area });
            }
        }

        Ok(overlaps)
    }
}

/// Best-effort text of a caught panic.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload.downcast_ref::<&str>().map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "geometry engine panicked".to_string())
}
