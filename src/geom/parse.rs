use crate::error::GeohashError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn parse_err(e: impl std::fmt::Display) -> GeohashError {
    GeohashError::GeometryParseError(e.to_string())
}

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// Anything starting with `{` is read as GeoJSON, everything else as WKT.
/// Coordinates are expected in WGS84 `(lon, lat)` order.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(GeohashError::GeometryParseError(
            "Empty geometry string".to_string(),
        ));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
///
/// Feature collections are rejected since a CSV cell holds one geometry.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let geojson = s.parse::<GeoJson>().map_err(parse_err)?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            GeohashError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeohashError::GeometryParseError(
                "FeatureCollection not supported, use individual geometries".to_string(),
            ));
        }
    };
    Geometry::try_from(geometry).map_err(parse_err)
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(parse_err)?;

    wkt.try_into().map_err(|_| {
        GeohashError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}
