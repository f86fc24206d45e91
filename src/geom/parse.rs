use crate::util::error::DigiPinError;
use geo::CoordsIter;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Text encodings accepted for a location geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryText {
    GeoJson,
    Wkt,
}

impl GeometryText {
    /// GeoJSON is detected by a leading `{`, everything else is treated as WKT.
    fn detect(s: &str) -> Self {
        if s.starts_with('{') {
            GeometryText::GeoJson
        } else {
            GeometryText::Wkt
        }
    }
}

/// Parses a WKT or GeoJSON location in lon/lat order.
///
/// Geometries carrying a NaN or infinite coordinate are rejected here, so a
/// bad value is reported as a parse failure rather than reaching the encoder.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigiPinError> {
    read_geometry(s).map_err(DigiPinError::GeometryParseError)
}

/// Like [`parse_geometry`], naming the CSV column and line in the error.
pub fn parse_geometry_field(
    s: &str,
    column: &str,
    line: u64,
) -> Result<Geometry<f64>, DigiPinError> {
    read_geometry(s).map_err(|reason| {
        DigiPinError::GeometryParseError(format!(
            "column '{}', line {}: {}",
            column, line, reason
        ))
    })
}

fn read_geometry(s: &str) -> Result<Geometry<f64>, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty geometry".to_string());
    }

    let geom = match GeometryText::detect(trimmed) {
        GeometryText::GeoJson => read_geojson(trimmed)?,
        GeometryText::Wkt => read_wkt(trimmed)?,
    };
    ensure_finite(&geom)?;
    Ok(geom)
}

fn read_geojson(s: &str) -> Result<Geometry<f64>, String> {
    let geometry = match s.parse::<GeoJson>() {
        Ok(GeoJson::Geometry(geom)) => geom,
        Ok(GeoJson::Feature(feat)) => feat
            .geometry
            .ok_or_else(|| "GeoJSON feature has no geometry".to_string())?,
        Ok(GeoJson::FeatureCollection(_)) => {
            return Err("GeoJSON FeatureCollection not supported, use one geometry per row".into());
        }
        Err(e) => return Err(format!("invalid GeoJSON: {}", e)),
    };

    Geometry::try_from(geometry).map_err(|e| format!("unsupported GeoJSON geometry: {}", e))
}

fn read_wkt(s: &str) -> Result<Geometry<f64>, String> {
    let wkt = Wkt::<f64>::from_str(s).map_err(|e| format!("invalid WKT: {}", e))?;
    wkt.try_into()
        .map_err(|_| "WKT has no geometry equivalent".to_string())
}

fn ensure_finite(geom: &Geometry<f64>) -> Result<(), String> {
    match geom
        .coords_iter()
        .find(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        Some(c) => Err(format!("non-finite coordinate ({}, {})", c.x, c.y)),
        None => Ok(()),
    }
}
