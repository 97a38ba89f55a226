#![doc = "Area-weighted crosswalks between vintages of Japanese municipal boundaries"]
mod common;
mod config;
mod crosswalk;
mod error;
mod geom;
mod layer;
mod pipeline;

#[doc(inline)]
pub use config::{default_layer_path, default_output_path, CrosswalkConfig, DEFAULT_WEIGHT_THRESHOLD};

#[doc(inline)]
pub use error::{CrosswalkError, Result};

#[doc(inline)]
pub use geom::{Geometries, Overlap, SpatialRef, NEGLIGIBLE_AREA};

#[doc(inline)]
pub use layer::{
    city_code_column, city_column, gun_column, normalize, pref_column, BoundaryLayer, RegionIds,
    CITY_CODE_FIELD, CITY_FIELD, GUN_FIELD, PREF_FIELD,
};

#[doc(inline)]
pub use crosswalk::{
    apply_threshold, compute_weights, intersect, AreaLookup, Crosswalk, CrosswalkRow, FilterStats,
    IntersectionRecord, WeightStats,
};

#[doc(inline)]
pub use pipeline::{build_crosswalk, run, RunReport};
