use std::path::Path;

use polars::{frame::DataFrame, prelude::Column};
use tracing::info;

use crate::{
    common::write_table,
    crosswalk::{Crosswalk, CrosswalkRow},
    error::Result,
    layer::{city_code_column, city_column, gun_column, pref_column, RegionIds},
};

impl Crosswalk {
    /// Flatten the crosswalk into its output table: the identifier columns of the
    /// source vintage, then those of the target vintage, then `weight`.
    /// `GUN<year>` only appears for a vintage that carries it.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(9);
        push_ids(&mut columns, self.source_year, self.source_has_gun, &self.rows, |row| &row.source);
        push_ids(&mut columns, self.target_year, self.target_has_gun, &self.rows, |row| &row.target);
        columns.push(Column::new(
            "weight".into(),
            self.rows.iter().map(|row| row.weight).collect::<Vec<f64>>(),
        ));
        Ok(DataFrame::new(columns)?)
    }

    /// Persist the crosswalk table to `path` (CSV, or Parquet for a `.parquet` extension).
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        write_table(&mut df, path)?;
        info!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

fn push_ids(
    columns: &mut Vec<Column>,
    year: u16,
    has_gun: bool,
    rows: &[CrosswalkRow],
    side: impl Fn(&CrosswalkRow) -> &RegionIds,
) {
    let strings = |field: fn(&RegionIds) -> &str| -> Vec<String> {
        rows.iter().map(|row| field(side(row)).to_string()).collect()
    };

    columns.push(Column::new(pref_column(year).into(), strings(|ids| ids.pref.as_str())));
    columns.push(Column::new(city_column(year).into(), strings(|ids| ids.city.as_str())));
    if has_gun {
        columns.push(Column::new(gun_column(year).into(), strings(|ids| ids.gun.as_str())));
    }
    columns.push(Column::new(city_code_column(year).into(), strings(|ids| ids.city_code.as_str())));
}
