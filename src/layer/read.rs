use std::path::Path;

use geo::MultiPolygon;
use polars::frame::DataFrame;
use tracing::{info, warn};

use crate::{common::read_shapefile, error::{CrosswalkError, Result}, geom::{Geometries, SpatialRef}};

use super::{city_column, gun_column, pref_column, BoundaryLayer, CITY_FIELD, GUN_FIELD, PREF_FIELD};

impl BoundaryLayer {
    /// Loads one vintage from a `.shp` file path (attributes from `.dbf`, reference system from `.prj`).
    pub fn from_shapefile(year: u16, path: &Path) -> Result<Self> {
        info!("Loading {year} boundaries from {}...", path.display());
        let (shapes, data) = read_shapefile(path)?;
        let crs = SpatialRef::from_prj(path)?;
        Self::build(year, data, shapes, crs, path)
    }

    /// Build a layer from an attribute table with raw `PREF`/`CITY`/`GUN` columns and
    /// one geometry per row.
    pub fn new(year: u16, data: DataFrame, shapes: Vec<MultiPolygon<f64>>, crs: SpatialRef) -> Result<Self> {
        Self::build(year, data, shapes, crs, Path::new("<memory>"))
    }

    fn build(year: u16, mut data: DataFrame, shapes: Vec<MultiPolygon<f64>>, crs: SpatialRef, origin: &Path) -> Result<Self> {
        if data.height() != shapes.len() {
            return Err(CrosswalkError::Invalid(format!(
                "{}: {} attribute rows but {} geometries", origin.display(), data.height(), shapes.len()
            )));
        }

        for field in [PREF_FIELD, CITY_FIELD] {
            if data.column(field).is_err() {
                return Err(CrosswalkError::Schema { column: field.to_string(), path: origin.to_path_buf() });
            }
        }

        // Qualify identifying columns by vintage so two layers never collide.
        data.rename(PREF_FIELD, pref_column(year).into())?;
        data.rename(CITY_FIELD, city_column(year).into())?;
        if data.column(GUN_FIELD).is_ok() {
            data.rename(GUN_FIELD, gun_column(year).into())?;
        }

        let null_cities = data.column(&city_column(year))?.null_count();
        if null_cities > 0 {
            warn!("{null_cities} regions in the {year} layer have no {CITY_FIELD} value.");
        }

        let layer = Self { year, data, geoms: Geometries::new(shapes), crs };
        info!("Loaded {} regions for {year} ({})", layer.len(), layer.crs);
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};
    use polars::prelude::Column;

    use super::*;
    use crate::layer::{RegionIds, CITY_CODE_FIELD};

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0)]])
    }

    #[test]
    fn identifying_columns_are_qualified_by_year() {
        let data = DataFrame::new(vec![
            Column::new("PREF".into(), vec!["13".to_string()]),
            Column::new("CITY".into(), vec!["Chiyoda".to_string()]),
            Column::new("GUN".into(), vec![Option::<String>::None]),
            Column::new(CITY_CODE_FIELD.into(), vec!["13101".to_string()]),
        ]).unwrap();
        let layer = BoundaryLayer::new(1980, data, vec![unit_square()], SpatialRef::Unknown).unwrap();

        let names: Vec<String> = layer.data.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["PREF1980", "CITY1980", "GUN1980", CITY_CODE_FIELD]);
        assert!(layer.has_gun());
        assert_eq!(layer.ids().unwrap(), vec![RegionIds {
            pref: "13".into(), city: "Chiyoda".into(), gun: String::new(), city_code: "13101".into(),
        }]);
    }

    #[test]
    fn gun_and_city_code_are_optional() {
        let data = DataFrame::new(vec![
            Column::new("PREF".into(), vec!["01".to_string()]),
            Column::new("CITY".into(), vec!["Sapporo".to_string()]),
        ]).unwrap();
        let layer = BoundaryLayer::new(2000, data, vec![unit_square()], SpatialRef::Unknown).unwrap();

        assert!(!layer.has_gun());
        let ids = layer.ids().unwrap();
        assert_eq!(ids[0].city, "Sapporo");
        assert!(ids[0].gun.is_empty() && ids[0].city_code.is_empty());
    }

    #[test]
    fn missing_city_column_is_a_schema_error() {
        let data = DataFrame::new(vec![Column::new("PREF".into(), vec!["01".to_string()])]).unwrap();
        let err = BoundaryLayer::new(2000, data, vec![unit_square()], SpatialRef::Unknown).unwrap_err();
        assert!(matches!(err, CrosswalkError::Schema { ref column, .. } if column == "CITY"));
    }

    #[test]
    fn row_and_geometry_counts_must_agree() {
        let data = DataFrame::new(vec![
            Column::new("PREF".into(), vec!["01".to_string(), "02".to_string()]),
            Column::new("CITY".into(), vec!["a".to_string(), "b".to_string()]),
        ]).unwrap();
        let err = BoundaryLayer::new(2000, data, vec![unit_square()], SpatialRef::Unknown).unwrap_err();
        assert!(matches!(err, CrosswalkError::Invalid(_)));
    }
}
