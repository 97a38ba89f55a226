use std::{fmt, fs, path::Path, sync::LazyLock};

use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj, transform::transform};
use regex::Regex;

use crate::{error::{CrosswalkError, Result}, geom::Geometries};

/// Spatial reference system of a boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpatialRef {
    /// No `.prj` alongside the layer.
    #[default]
    Unknown,
    Epsg(u32),
    /// A PROJ.4 definition supplied by the caller.
    Proj4(String),
    /// WKT we could not map to an EPSG code; still comparable by text.
    Wkt(String),
}

static EPSG_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"AUTHORITY\[\s*"EPSG"\s*,\s*"?(\d+)"?\s*\]"#).unwrap()
});

static CS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(GEOGCS|PROJCS)\[\s*"([^"]+)""#).unwrap()
});

static UTM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(JGD[_ ]?2000|JGD[_ ]?2011|WGS[_ ]?(?:19)?84)[\W_]*UTM[_ ]zone[_ ](\d{1,2})([NS])").unwrap()
});

impl SpatialRef {
    /// Read the reference system from the `.prj` file next to a `.shp`, if any.
    pub fn from_prj(shp_path: &Path) -> Result<Self> {
        let prj = shp_path.with_extension("prj");
        if !prj.is_file() { return Ok(Self::Unknown) }
        Ok(Self::from_wkt(&fs::read_to_string(prj)?))
    }

    /// Recognise an EPSG code in ESRI/OGC WKT, falling back to the raw text.
    pub fn from_wkt(wkt: &str) -> Self {
        let wkt = wkt.trim();
        if wkt.is_empty() { return Self::Unknown }

        // The outermost AUTHORITY clause comes last in WKT1.
        if let Some(code) = EPSG_AUTHORITY.captures_iter(wkt).last()
            .and_then(|caps| caps[1].parse().ok()) {
            return Self::Epsg(code);
        }

        let Some(caps) = CS_NAME.captures(wkt) else { return Self::Wkt(wkt.to_string()) };
        let name = caps[2].to_ascii_uppercase().replace([' ', '-'], "_");
        let code = match (&caps[1], name.as_str()) {
            ("GEOGCS", "GCS_JGD_2011" | "JGD2011" | "JGD_2011") => Some(6668),
            ("GEOGCS", "GCS_JGD_2000" | "JGD2000" | "JGD_2000") => Some(4612),
            ("GEOGCS", "GCS_TOKYO" | "TOKYO") => Some(4301),
            ("GEOGCS", "GCS_WGS_1984" | "WGS_84" | "WGS84") => Some(4326),
            ("GEOGCS", "GCS_NORTH_AMERICAN_1983" | "NAD83") => Some(4269),
            ("PROJCS", "WGS_84_PSEUDO_MERCATOR" | "WGS_1984_WEB_MERCATOR_AUXILIARY_SPHERE") => Some(3857),
            ("PROJCS", _) => Self::utm_code(&caps[2]),
            _ => None,
        };
        code.map(Self::Epsg).unwrap_or_else(|| Self::Wkt(wkt.to_string()))
    }

    /// EPSG code of a named UTM projection on a supported datum.
    fn utm_code(name: &str) -> Option<u32> {
        let caps = UTM_NAME.captures(name)?;
        let zone: u32 = caps[2].parse().ok()?;
        let datum = caps[1].to_ascii_uppercase().replace([' ', '_'], "");
        match (datum.as_str(), &caps[3]) {
            ("JGD2000", "N") if (51..=55).contains(&zone) => Some(3046 + zone),
            ("JGD2011", "N") if (51..=55).contains(&zone) => Some(6637 + zone),
            (_, "N") if datum.starts_with("WGS") && (1..=60).contains(&zone) => Some(32600 + zone),
            (_, "S") if datum.starts_with("WGS") && (1..=60).contains(&zone) => Some(32700 + zone),
            _ => None,
        }
    }

    /// Whether two layers can be compared without reprojection.
    #[inline]
    pub fn matches(&self, other: &SpatialRef) -> bool { self == other }

    /// PROJ.4 definition, if this system is one we know how to build.
    pub fn proj4(&self) -> Option<String> {
        match self {
            Self::Epsg(code) => epsg_proj4(*code),
            Self::Proj4(definition) => Some(definition.clone()),
            Self::Unknown | Self::Wkt(_) => None,
        }
    }

    fn to_proj(&self) -> Result<Proj> {
        let definition = self.proj4()
            .ok_or_else(|| CrosswalkError::Crs(format!("no PROJ.4 definition for {self}")))?;
        Proj::from_proj_string(&definition)
            .map_err(|e| CrosswalkError::Crs(format!("failed to build PROJ.4 '{definition}': {e}")))
    }
}

impl fmt::Display for SpatialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Epsg(code) => write!(f, "EPSG:{code}"),
            Self::Proj4(definition) => write!(f, "{definition}"),
            Self::Wkt(wkt) => write!(f, "WKT {}", wkt.chars().take(60).collect::<String>()),
        }
    }
}

/// Built-in PROJ.4 definitions for the reference systems Japanese and US boundary data ship in.
fn epsg_proj4(code: u32) -> Option<String> {
    const JGD: &str = "+ellps=GRS80 +towgs84=0,0,0,0,0,0,0";
    Some(match code {
        4326 => "+proj=longlat +datum=WGS84 +no_defs".to_string(),
        4269 => "+proj=longlat +datum=NAD83 +no_defs".to_string(),
        4301 => "+proj=longlat +ellps=bessel +towgs84=-146.414,507.337,680.507,0,0,0,0 +no_defs".to_string(),
        4612 | 6668 => format!("+proj=longlat {JGD} +no_defs"),
        3857 => "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs".to_string(),
        3097..=3101 => format!("+proj=utm +zone={} {JGD} +units=m +no_defs", code - 3046),
        6688..=6692 => format!("+proj=utm +zone={} {JGD} +units=m +no_defs", code - 6637),
        32601..=32660 => format!("+proj=utm +zone={} +datum=WGS84 +units=m +no_defs", code - 32600),
        32701..=32760 => format!("+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs", code - 32700),
        _ => return None,
    })
}

impl Geometries {
    /// Reproject every shape from `from` into `to`, rebuilding the spatial index.
    pub fn reproject(&self, from: &SpatialRef, to: &SpatialRef) -> Result<Geometries> {
        let (src, dst) = (from.to_proj()?, to.to_proj()?);

        // proj4rs works in radians for geographic systems.
        let convert = |coord: Coord<f64>| -> std::result::Result<Coord<f64>, proj4rs::errors::Error> {
            let mut point = if src.is_latlong() {
                (coord.x.to_radians(), coord.y.to_radians(), 0.0)
            } else {
                (coord.x, coord.y, 0.0)
            };
            transform(&src, &dst, &mut point)?;
            Ok(if dst.is_latlong() {
                Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
            } else {
                Coord { x: point.0, y: point.1 }
            })
        };

        let shapes = self.shapes.iter()
            .map(|shape: &MultiPolygon<f64>| shape.try_map_coords(convert))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CrosswalkError::Crs(format!("transform {from} -> {to} failed: {e}")))?;

        Ok(Geometries::new(shapes))
    }
}
