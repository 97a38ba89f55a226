use geo::{Area, BoundingRect, CoordsIter, MultiPolygon};
use rstar::{RTree, AABB};

use crate::geom::BoundingBox;

/// Geometries holds a layer's MultiPolygons together with an R-tree over their bounding boxes.
/// Empty shapes and shapes with non-finite coordinates are kept but never indexed.
#[derive(Debug, Clone)]
pub struct Geometries {
    pub(crate) shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    pub fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter(|(_, shape)| is_finite(shape))
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                    .collect()
            ),
            shapes,
        }
    }

    /// Get the number of MultiPolygons.
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no MultiPolygons.
    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Number of shapes present in the spatial index.
    #[inline] pub fn indexed(&self) -> usize { self.rtree.size() }

    /// Query the R-tree for indices of shapes whose bounding boxes intersect the envelope.
    #[inline]
    pub(crate) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = usize> + '_ {
        self.rtree.locate_in_envelope_intersecting(envelope).map(|bb| bb.idx())
    }

    /// Planar area of every shape, in the squared units of the reference system.
    pub fn areas(&self) -> Vec<f64> {
        self.shapes.iter().map(|shape| shape.unsigned_area()).collect()
    }
}

/// True when every coordinate of `shape` is a finite number.
#[inline]
pub(crate) fn is_finite(shape: &MultiPolygon<f64>) -> bool {
    shape.coords_iter().all(|c| c.x.is_finite() && c.y.is_finite())
}
