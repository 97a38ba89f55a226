use std::{fs::File, io::BufWriter, path::Path};

use geo::MultiPolygon;
use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter}};
use shapefile::dbase::{self, FieldValue, Record};
use tracing::debug;

use crate::{common::{ensure_dir_exists, require_file_exists, shape_to_multipolygon}, error::{CrosswalkError, Result}};

/// Render any dbase value as text; nulls stay `None`.
pub(crate) fn field_to_string(value: &FieldValue) -> Option<String> {
    /// Integral numbers are written without a fractional part ("13101", not "13101.0").
    fn number(n: f64) -> String {
        if n.fract() == 0.0 && n.abs() < 1e15 { format!("{}", n as i64) } else { n.to_string() }
    }

    match value {
        FieldValue::Character(s) => s.as_ref().map(|s| s.trim().to_string()),
        FieldValue::Memo(s) => Some(s.trim().to_string()),
        FieldValue::Numeric(n) => n.map(number),
        FieldValue::Float(n) => n.map(|n| number(n as f64)),
        FieldValue::Double(n) => Some(number(*n)),
        FieldValue::Currency(n) => Some(number(*n)),
        FieldValue::Integer(n) => Some(n.to_string()),
        FieldValue::Logical(b) => b.map(|b| b.to_string()),
        FieldValue::Date(d) => d.map(|d| format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())),
        other => Some(format!("{other:?}")),
    }
}

/// Reads all shapes and attribute records from a `.shp` file (and its sibling `.dbf`).
/// Attributes come back as a DataFrame with one string column per dbase field, in file order.
pub(crate) fn read_shapefile(path: &Path) -> Result<(Vec<MultiPolygon<f64>>, DataFrame)> {
    let shp_error = |message: String| CrosswalkError::Shapefile { path: path.to_path_buf(), message };

    require_file_exists(path)?;

    let field_names: Vec<String> = dbase::Reader::from_path(path.with_extension("dbf"))
        .map_err(|e| shp_error(format!("Failed to open attribute table: {e}")))?
        .fields().iter()
        .map(|field| field.name().to_string())
        .collect();

    let mut reader = shapefile::Reader::from_path(path)
        .map_err(|e| shp_error(format!("Failed to open shapefile: {e}")))?;

    let mut shapes: Vec<MultiPolygon<f64>> = Vec::new();
    let mut records: Vec<Record> = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.map_err(|e| shp_error(format!("Error reading shape+record: {e}")))?;
        shapes.push(shape_to_multipolygon(shape, path)?);
        records.push(record);
    }
    debug!("read {} shapes with fields {:?} from {}", shapes.len(), field_names, path.display());

    let columns = field_names.iter()
        .map(|name| Column::new(
            name.as_str().into(),
            records.iter()
                .map(|record| record.get(name).and_then(field_to_string))
                .collect::<Vec<Option<String>>>(),
        ))
        .collect::<Vec<_>>();

    // A dbase table always has a row per shape; an empty field list still needs the height.
    let data = if columns.is_empty() {
        DataFrame::empty_with_height(shapes.len())
    } else {
        DataFrame::new(columns)?
    };

    Ok((shapes, data))
}

/// Write a table to `path`, creating the parent directory. The format follows the file
/// extension: `.parquet` writes Parquet, anything else CSV.
pub(crate) fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    match path.extension().and_then(|ext| ext.to_str()) {
        #[cfg(feature = "parquet")]
        Some(ext) if ext.eq_ignore_ascii_case("parquet") => {
            polars::prelude::ParquetWriter::new(writer).finish(df)?;
        }
        _ => CsvWriter::new(writer).finish(df)?,
    }
    Ok(())
}
