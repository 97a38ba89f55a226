use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{PolygonRing, Shape};

use crate::error::{CrosswalkError, Result};

/// Assemble shapefile rings into a MultiPolygon. Shapefiles store each outer ring
/// followed by its holes, so a hole attaches to the most recent outer ring.
pub(crate) fn rings_to_multipolygon<P, F>(rings: &[PolygonRing<P>], coord: F) -> MultiPolygon<f64>
where
    F: Fn(&P) -> Coord<f64>,
{
    /// Close a ring if its last vertex differs from the first.
    fn closed(mut coords: Vec<Coord<f64>>) -> LineString<f64> {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
        LineString(coords)
    }

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let coords = ring.points().iter().map(&coord).collect::<Vec<_>>();
        match ring {
            PolygonRing::Outer(_) => {
                if let Some(ext) = exterior.take() {
                    polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
                }
                exterior = Some(closed(coords));
            }
            // A hole before any outer ring has nothing to belong to.
            PolygonRing::Inner(_) if exterior.is_none() => {}
            PolygonRing::Inner(_) => holes.push(closed(coords)),
        }
    }
    if let Some(ext) = exterior {
        polygons.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polygons)
}

/// Coerce a shapefile shape into an owned multipolygon. Null shapes become empty
/// multipolygons; any non-areal shape is an error.
pub(crate) fn shape_to_multipolygon(shape: Shape, path: &Path) -> Result<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonM(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonZ(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::NullShape => Ok(MultiPolygon(Vec::new())),
        other => Err(CrosswalkError::Shapefile {
            path: path.to_path_buf(),
            message: format!("found non-Polygon shape in layer: {:?}", other.shapetype()),
        }),
    }
}
