#![allow(dead_code)]

use std::path::Path;

use geo::{polygon, MultiPolygon};
use jpcrosswalk::{BoundaryLayer, SpatialRef};
use polars::{frame::DataFrame, prelude::Column};
use shapefile::{
    dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
    Point, Polygon, PolygonRing,
};

pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1), (x: x0, y: y0)]])
}

/// An in-memory layer whose regions are named by `cities`, all in prefecture "13".
pub fn layer(year: u16, cities: &[&str], shapes: Vec<MultiPolygon<f64>>, crs: SpatialRef) -> BoundaryLayer {
    let data = DataFrame::new(vec![
        Column::new("PREF".into(), vec!["13".to_string(); cities.len()]),
        Column::new("CITY".into(), cities.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
    ]).unwrap();
    BoundaryLayer::new(year, data, shapes, crs).unwrap()
}

/// A region to be written into a test shapefile.
pub struct Region<'a> {
    pub pref: &'a str,
    pub city: &'a str,
    pub gun: Option<&'a str>,
    pub bounds: (f64, f64, f64, f64),
}

/// Write `regions` as a polygon shapefile at `path`. A `GUN` field is only added when
/// `with_gun` is set; `prj` (if any) is written next to the `.shp`.
pub fn write_shapefile(path: &Path, regions: &[Region], with_gun: bool, prj: Option<&str>) {
    let mut table = TableWriterBuilder::new()
        .add_character_field(FieldName::try_from("PREF").unwrap(), 8)
        .add_character_field(FieldName::try_from("CITY").unwrap(), 32);
    if with_gun {
        table = table.add_character_field(FieldName::try_from("GUN").unwrap(), 32);
    }

    {
        let mut writer = shapefile::Writer::from_path(path, table).unwrap();
        for region in regions {
            let (x0, y0, x1, y1) = region.bounds;
            let polygon = Polygon::with_rings(vec![PolygonRing::Outer(vec![
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
                Point::new(x0, y0),
            ])]);

            let mut record = Record::default();
            record.insert("PREF".to_string(), FieldValue::Character(Some(region.pref.to_string())));
            record.insert("CITY".to_string(), FieldValue::Character(Some(region.city.to_string())));
            if with_gun {
                record.insert("GUN".to_string(), FieldValue::Character(region.gun.map(str::to_string)));
            }
            writer.write_shape_and_record(&polygon, &record).unwrap();
        }
    }

    if let Some(prj) = prj {
        std::fs::write(path.with_extension("prj"), prj).unwrap();
    }
}

pub const JGD2000_PRJ: &str = r#"GEOGCS["GCS_JGD_2000",DATUM["D_JGD_2000",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
