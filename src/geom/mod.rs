mod bbox;
mod geom;
mod overlay;
mod proj;

use bbox::BoundingBox;
pub use geom::Geometries;
pub use overlay::{Overlap, NEGLIGIBLE_AREA};
pub use proj::SpatialRef;
