mod common;

use std::fs;

use common::{write_shapefile, Region, JGD2000_PRJ};
use jpcrosswalk::{default_layer_path, run, BoundaryLayer, CrosswalkConfig, CrosswalkError, SpatialRef};

fn region<'a>(city: &'a str, gun: Option<&'static str>, bounds: (f64, f64, f64, f64)) -> Region<'a> {
    Region { pref: "13", city, gun, bounds }
}

#[test]
fn shapefile_layer_is_loaded_with_qualified_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jpn1980geo.shp");
    write_shapefile(&path, &[
        region("Chiyoda", Some("g1"), (139.70, 35.60, 139.80, 35.70)),
        region("Chuo", None, (139.80, 35.60, 139.90, 35.70)),
    ], true, Some(JGD2000_PRJ));

    let layer = BoundaryLayer::from_shapefile(1980, &path).unwrap();

    assert_eq!(layer.len(), 2);
    assert_eq!(layer.crs, SpatialRef::Epsg(4612));
    assert!(layer.has_gun());
    assert!(layer.data.column("CITY1980").is_ok());
    assert!(layer.data.column("CITY").is_err());

    let ids = layer.ids().unwrap();
    assert_eq!(ids[0].city, "Chiyoda");
    assert_eq!(ids[0].gun, "g1");
    assert_eq!(ids[1].gun, "");
    // No N03_007 field in these files.
    assert_eq!(ids[1].city_code, "");
}

#[test]
fn missing_prj_leaves_system_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layer.shp");
    write_shapefile(&path, &[region("A", None, (0.0, 0.0, 1.0, 1.0))], false, None);

    let layer = BoundaryLayer::from_shapefile(2000, &path).unwrap();
    assert_eq!(layer.crs, SpatialRef::Unknown);
    assert!(!layer.has_gun());
}

#[test]
fn missing_layer_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = CrosswalkConfig { root: dir.path().to_path_buf(), ..CrosswalkConfig::default() };

    match run(&config) {
        Err(CrosswalkError::NotFound { path }) => assert_eq!(path, default_layer_path(dir.path(), 2000)),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(!config.output_path().exists());
}

#[test]
fn run_writes_crosswalk_under_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let source = default_layer_path(root, 2000);
    let target = default_layer_path(root, 1980);
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::create_dir_all(target.parent().unwrap()).unwrap();

    write_shapefile(&source, &[region("A", None, (0.0, 0.0, 10.0, 10.0))], false, Some(JGD2000_PRJ));
    write_shapefile(&target, &[
        region("B", Some("west"), (0.0, 0.0, 5.0, 10.0)),
        region("C", Some("east"), (5.0, 0.0, 10.0, 10.0)),
    ], true, Some(JGD2000_PRJ));

    let config = CrosswalkConfig { root: root.to_path_buf(), ..CrosswalkConfig::default() };
    let report = run(&config).unwrap();

    let output = root.join("Crosswalk").join("Crosswalk_2000_1980.csv");
    assert_eq!(report.output_path.as_deref(), Some(output.as_path()));
    assert_eq!(report.filter.rows_out, 2);
    assert!(!report.reprojected);

    let text = fs::read_to_string(&output).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("PREF2000,CITY2000,City Code 2000,PREF1980,CITY1980,GUN1980,City Code 1980,weight")
    );
    // Empty identifiers may be written quoted.
    let mut rows: Vec<String> = lines.map(|line| line.replace('"', "")).collect();
    rows.sort();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("13,A,,13,B,west,,"));
    assert!(rows[1].starts_with("13,A,,13,C,east,,"));
}

#[test]
fn layer_without_city_field_is_a_schema_error() {
    use shapefile::{dbase::{FieldName, FieldValue, Record, TableWriterBuilder}, Point, Polygon, PolygonRing};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nocity.shp");
    {
        let table = TableWriterBuilder::new().add_character_field(FieldName::try_from("PREF").unwrap(), 8);
        let mut writer = shapefile::Writer::from_path(&path, table).unwrap();
        let polygon = Polygon::with_rings(vec![PolygonRing::Outer(vec![
            Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0),
        ])]);
        let mut record = Record::default();
        record.insert("PREF".to_string(), FieldValue::Character(Some("13".to_string())));
        writer.write_shape_and_record(&polygon, &record).unwrap();
    }

    match BoundaryLayer::from_shapefile(2000, &path) {
        Err(CrosswalkError::Schema { column, .. }) => assert_eq!(column, "CITY"),
        other => panic!("expected Schema error, got {other:?}"),
    }
}
