mod normalize;
mod read;

use std::fmt;

use polars::frame::DataFrame;

use crate::{error::Result, geom::{Geometries, SpatialRef}};

pub use normalize::normalize;

/// Attribute names as they appear in the boundary files.
pub const PREF_FIELD: &str = "PREF";
pub const CITY_FIELD: &str = "CITY";
pub const GUN_FIELD: &str = "GUN";
/// National administrative code column of MLIT N03 boundary data.
pub const CITY_CODE_FIELD: &str = "N03_007";

#[inline] pub fn pref_column(year: u16) -> String { format!("{PREF_FIELD}{year}") }
#[inline] pub fn city_column(year: u16) -> String { format!("{CITY_FIELD}{year}") }
#[inline] pub fn gun_column(year: u16) -> String { format!("{GUN_FIELD}{year}") }
#[inline] pub fn city_code_column(year: u16) -> String { format!("City Code {year}") }

/// Vintage-qualified identifiers of one region. Absent values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionIds {
    pub pref: String,
    pub city: String,
    pub gun: String,
    pub city_code: String,
}

/// One vintage of administrative boundaries: a geometry per row of `data`.
///
/// `data` holds every attribute of the source file as a string column, with the
/// identifying columns renamed to `PREF<year>`, `CITY<year>` and (if present) `GUN<year>`.
pub struct BoundaryLayer {
    pub year: u16,
    pub data: DataFrame,
    pub geoms: Geometries,
    pub crs: SpatialRef,
}

impl BoundaryLayer {
    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    /// Whether this vintage carries a sub-prefecture (gun) column.
    #[inline]
    pub fn has_gun(&self) -> bool {
        self.data.column(&gun_column(self.year)).is_ok()
    }

    /// Identifier set of every region, in layer order.
    pub fn ids(&self) -> Result<Vec<RegionIds>> {
        let strings = |name: &str| -> Result<Vec<String>> {
            let Ok(column) = self.data.column(name) else { return Ok(vec![String::new(); self.len()]) };
            Ok(column.str()?.into_iter()
                .map(|value| value.unwrap_or_default().to_string())
                .collect())
        };

        let prefs = strings(&pref_column(self.year))?;
        let cities = strings(&city_column(self.year))?;
        let guns = strings(&gun_column(self.year))?;
        let codes = strings(CITY_CODE_FIELD)?;

        Ok(prefs.into_iter().zip(cities).zip(guns).zip(codes)
            .map(|(((pref, city), gun), city_code)| RegionIds { pref, city, gun, city_code })
            .collect())
    }

    /// Replace the geometries, keeping attributes. Used after reprojection.
    pub(crate) fn with_geoms(self, geoms: Geometries, crs: SpatialRef) -> Self {
        Self { geoms, crs, ..self }
    }
}

impl fmt::Debug for BoundaryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryLayer")
            .field("year", &self.year)
            .field("regions", &self.len())
            .field("indexed", &self.geoms.indexed())
            .field("columns", &self.data.get_column_names())
            .field("crs", &self.crs.to_string())
            .finish()
    }
}
