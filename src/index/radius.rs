use crate::coord::{Coordinate, validate_lat, validate_lon};
use crate::error::GeohashError;
use crate::geom::BoundingBox;
use crate::index::codec::{decode, encode};
use crate::index::constants::{BITS_PER_CHAR, DEG_LAT_IN_METERS, MERCATOR_MAX};
use crate::index::neighbor::{children, ring};
use serde::{Deserialize, Serialize};

// Ring positions, clockwise from Top.
const NORTH_SIDE: [usize; 3] = [7, 0, 1];
const EAST_SIDE: [usize; 3] = [1, 2, 3];
const SOUTH_SIDE: [usize; 3] = [3, 4, 5];
const WEST_SIDE: [usize; 3] = [5, 6, 7];

fn validate_radius(radius_meters: f64) -> Result<f64, GeohashError> {
    if radius_meters.is_finite() && radius_meters > 0.0 {
        Ok(radius_meters)
    } else {
        Err(GeohashError::InvalidRadius(radius_meters))
    }
}

/// Estimates how many halvings of the Earth give a cell about `radius_meters` wide.
///
/// Doubles the radius until it reaches [`MERCATOR_MAX`] and counts the steps.
/// Radii at or beyond half the circumference need no halving at all.
///
/// # Example
/// ```
/// use geohash_rs::estimate_precision;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// assert_eq!(estimate_precision(50.0)?, 19);
/// assert_eq!(estimate_precision(50_000.0)?, 9);
/// # Ok(())
/// # }
/// ```
pub fn estimate_precision(radius_meters: f64) -> Result<u32, GeohashError> {
    let mut value = validate_radius(radius_meters)?;
    let mut step = 1;
    while value < MERCATOR_MAX {
        value *= 2.0;
        step += 1;
    }
    Ok(step - 1)
}

/// Latitude and longitude span in degrees of any cell of `precision` characters.
pub fn cell_dimensions(precision: usize) -> (f64, f64) {
    let bits = precision * BITS_PER_CHAR;
    let lat_bits = bits / 2;
    let lon_bits = bits - lat_bits;
    (
        180.0 / 2f64.powi(lat_bits as i32),
        360.0 / 2f64.powi(lon_bits as i32),
    )
}

/// Lat/lon box around a point on the mean sphere; no validation.
fn radius_box(lat: f64, lon: f64, radius_meters: f64) -> BoundingBox {
    let delta_lat = radius_meters / DEG_LAT_IN_METERS;
    let delta_lon = radius_meters / (DEG_LAT_IN_METERS * lat.to_radians().cos());
    BoundingBox::new(
        lat - delta_lat,
        lon - delta_lon,
        lat + delta_lat,
        lon + delta_lon,
    )
}

/// Returns the box spanning `radius_meters` around a point.
///
/// Uses a spherical Earth: the latitude delta is the radius over the length
/// of one degree, and the longitude delta is further divided by the cosine
/// of the latitude. The longitude delta grows without bound towards the
/// poles. The result is not clamped to the world.
///
/// # Errors
///
/// - [`GeohashError::InvalidLatitude`] / [`GeohashError::InvalidLongitude`]
/// - [`GeohashError::InvalidRadius`] - radius not positive and finite
pub fn bounding_box(lat: f64, lon: f64, radius_meters: f64) -> Result<BoundingBox, GeohashError> {
    Ok(RadiusQuery::new(lat, lon, radius_meters)?.bounding_box())
}

/// Returns the cells covering `radius_meters` around a point, center cell first.
///
/// The remaining entries are those neighbours of the center cell, clockwise
/// from Top, that are still needed to cover the radius box on a side the
/// center cell does not already reach.
///
/// # Example
/// ```
/// use geohash_rs::areas_by_radius;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let areas = areas_by_radius(45.37, -121.7, 50_000.0)?;
/// assert_eq!(areas, ["c21", "9rc"]);
/// # Ok(())
/// # }
/// ```
pub fn areas_by_radius(lat: f64, lon: f64, radius_meters: f64) -> Result<Vec<String>, GeohashError> {
    RadiusQuery::new(lat, lon, radius_meters)?.areas()
}

/// Replaces each cell by those of its 32 children whose interiors overlap `bbox`.
pub fn refine_to_box<S: AsRef<str>>(
    hashes: &[S],
    bbox: &BoundingBox,
) -> Result<Vec<String>, GeohashError> {
    let mut refined = Vec::with_capacity(hashes.len() * 8);
    for hash in hashes {
        for child in children(hash.as_ref())? {
            if decode(&child)?.intersects(bbox) {
                refined.push(child);
            }
        }
    }
    Ok(refined)
}

/// Returns [`areas_by_radius`] refined one character deeper against the radius box.
///
/// Covers the same box with cells a 32nd of the size, usually far tighter.
pub fn cover_radius(lat: f64, lon: f64, radius_meters: f64) -> Result<Vec<String>, GeohashError> {
    RadiusQuery::new(lat, lon, radius_meters)?.cover()
}

/// A validated point and radius.
///
/// Deserialization goes through [`RadiusQuery::new`], so a query never holds
/// an out-of-range coordinate or a non-positive radius.
///
/// # Example
/// ```
/// use geohash_rs::RadiusQuery;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let query = RadiusQuery::new(45.37, -121.7, 50_000.0)?;
/// assert_eq!(query.precision()?, 3);
/// assert_eq!(query.areas()?[0], "c21");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRadiusQuery")]
pub struct RadiusQuery {
    lat: f64,
    lon: f64,
    radius_meters: f64,
}

#[derive(Deserialize)]
struct RawRadiusQuery {
    lat: f64,
    lon: f64,
    radius_meters: f64,
}

impl TryFrom<RawRadiusQuery> for RadiusQuery {
    type Error = GeohashError;

    fn try_from(raw: RawRadiusQuery) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon, raw.radius_meters)
    }
}

impl RadiusQuery {
    pub fn new(lat: f64, lon: f64, radius_meters: f64) -> Result<Self, GeohashError> {
        Ok(Self {
            lat: validate_lat(lat)?,
            lon: validate_lon(lon)?,
            radius_meters: validate_radius(radius_meters)?,
        })
    }

    /// Create a query around a `(lon, lat)` tuple or `geo_types::Point`.
    pub fn from_coord(coord: &impl Coordinate, radius_meters: f64) -> Result<Self, GeohashError> {
        Self::new(coord.lat(), coord.lon(), radius_meters)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn bounding_box(&self) -> BoundingBox {
        radius_box(self.lat, self.lon, self.radius_meters)
    }

    /// Character length of the center cell.
    ///
    /// Starts from [`estimate_precision`] and shortens the hash while a cell is
    /// smaller than the radius box's half-extent, so one ring of neighbours
    /// always reaches past every side of the box.
    pub fn precision(&self) -> Result<usize, GeohashError> {
        let steps = estimate_precision(self.radius_meters)? as usize;
        let estimated = steps * 2 / BITS_PER_CHAR;

        let target = self.bounding_box();
        let (half_height, half_width) = (target.height() / 2.0, target.width() / 2.0);
        let mut precision = estimated;
        while precision > 0 {
            let (height, width) = cell_dimensions(precision);
            if height >= half_height && width >= half_width {
                break;
            }
            precision -= 1;
        }
        if precision != estimated {
            log::debug!(
                "radius {}m at lat {}: shortened cover precision {} -> {}",
                self.radius_meters,
                self.lat,
                estimated,
                precision
            );
        }
        Ok(precision)
    }

    /// Center cell followed by the neighbours still needed; see [`areas_by_radius`].
    pub fn areas(&self) -> Result<Vec<String>, GeohashError> {
        let target = self.bounding_box();
        let center = encode(self.lat, self.lon, self.precision()?)?;
        let cell = decode(&center)?;
        let mut around = ring(&center)?;

        let mut prune = |side: [usize; 3]| {
            for idx in side {
                around[idx] = None;
            }
        };
        if cell.south <= target.south {
            prune(SOUTH_SIDE);
        }
        if cell.north >= target.north {
            prune(NORTH_SIDE);
        }
        if cell.west <= target.west {
            prune(WEST_SIDE);
        }
        if cell.east >= target.east {
            prune(EAST_SIDE);
        }

        let mut areas = Vec::with_capacity(9);
        areas.push(center);
        areas.extend(around.into_iter().flatten());
        Ok(areas)
    }

    /// See [`cover_radius`].
    pub fn cover(&self) -> Result<Vec<String>, GeohashError> {
        refine_to_box(&self.areas()?, &self.bounding_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::f64::consts::PI;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn total_area(hashes: &[String]) -> Result<f64, GeohashError> {
        hashes.iter().map(|h| decode(h).map(|b| b.area_m2())).sum()
    }

    fn wrap_lon(lon: f64) -> f64 {
        if (-180.0..=180.0).contains(&lon) {
            lon
        } else {
            (lon + 180.0).rem_euclid(360.0) - 180.0
        }
    }

    /// Checks a grid of sample points across the radius box against the cells.
    fn covers(hashes: &[String], target: &BoundingBox) -> Result<bool, GeohashError> {
        let cells = hashes
            .iter()
            .map(|h| decode(h))
            .collect::<Result<Vec<_>, _>>()?;
        for i in 0..=8 {
            for j in 0..=8 {
                let lat = target.south + target.height() * i as f64 / 8.0;
                let lon = target.west + target.width() * j as f64 / 8.0;
                let sample = (wrap_lon(lon), lat.clamp(-90.0, 90.0));
                if !cells.iter().any(|cell| cell.contains(&sample)) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    #[test]
    fn test_estimate_precision_known() -> Result<(), GeohashError> {
        assert_eq!(estimate_precision(50.0)?, 19);
        assert_eq!(estimate_precision(50_000.0)?, 9);
        assert_eq!(estimate_precision(MERCATOR_MAX)?, 0);
        assert_eq!(estimate_precision(1e9)?, 0);
        Ok(())
    }

    #[test]
    fn test_estimate_precision_rejects_bad_radius() {
        assert_eq!(
            estimate_precision(0.0),
            Err(GeohashError::InvalidRadius(0.0))
        );
        assert!(estimate_precision(-10.0).is_err());
        assert!(estimate_precision(f64::NAN).is_err());
        assert!(estimate_precision(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cell_dimensions() {
        assert_eq!(cell_dimensions(0), (180.0, 360.0));
        assert_eq!(cell_dimensions(1), (45.0, 45.0));
        assert_eq!(cell_dimensions(2), (5.625, 11.25));
        assert_eq!(cell_dimensions(3), (1.40625, 1.40625));
    }

    #[test]
    fn test_bounding_box_known() -> Result<(), GeohashError> {
        let bbox = bounding_box(45.37, -121.7, 50_000.0)?;
        assert!((bbox.south - 44.92046603186477).abs() < 1e-9);
        assert!((bbox.west - (-122.33988252902259)).abs() < 1e-9);
        assert!((bbox.north - 45.819533968135225).abs() < 1e-9);
        assert!((bbox.east - (-121.06011747097742)).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_bounding_box_equator_is_square() -> Result<(), GeohashError> {
        let bbox = bounding_box(0.0, 0.0, DEG_LAT_IN_METERS)?;
        assert!((bbox.height() - 2.0).abs() < 1e-12);
        assert!((bbox.width() - 2.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_bounding_box_rejects_bad_input() {
        assert_eq!(
            bounding_box(95.0, 0.0, 10.0),
            Err(GeohashError::InvalidLatitude(95.0))
        );
        assert_eq!(
            bounding_box(0.0, 200.0, 10.0),
            Err(GeohashError::InvalidLongitude(200.0))
        );
        assert_eq!(
            bounding_box(0.0, 0.0, -1.0),
            Err(GeohashError::InvalidRadius(-1.0))
        );
    }

    #[test]
    fn test_areas_by_radius_known() -> Result<(), GeohashError> {
        init_logger();
        assert_eq!(areas_by_radius(45.37, -121.7, 50_000.0)?, ["c21", "9rc"]);
        assert_eq!(
            areas_by_radius(45.37, -121.7, 50.0)?,
            ["c216nek", "c216nem"]
        );
        assert_eq!(areas_by_radius(42.6, -5.6, 1000.0)?, ["ezs42"]);
        Ok(())
    }

    #[test]
    fn test_areas_by_radius_across_antimeridian() -> Result<(), GeohashError> {
        init_logger();
        let areas = areas_by_radius(0.0, 179.9, 30_000.0)?;
        assert_eq!(areas, ["rzz", "xbp", "800", "2pb"]);
        Ok(())
    }

    #[test]
    fn test_areas_by_radius_huge_radius_is_world() -> Result<(), GeohashError> {
        assert_eq!(areas_by_radius(10.0, 10.0, 3.0e7)?, [""]);
        Ok(())
    }

    #[test]
    fn test_precision_shortened_when_radius_exceeds_cell() -> Result<(), GeohashError> {
        init_logger();
        // 38 km at the equator estimates 4 characters, whose cells are ~19 km tall.
        let query = RadiusQuery::new(4.97, 149.31, 38_182.0)?;
        assert_eq!(query.precision()?, 3);
        assert!(covers(&query.areas()?, &query.bounding_box())?);
        Ok(())
    }

    #[test]
    fn test_children_of_center_overlapping_box() -> Result<(), GeohashError> {
        let target = bounding_box(45.37, -121.7, 50_000.0)?;
        let refined: HashSet<String> = refine_to_box(&["c21"], &target)?.into_iter().collect();
        let expected: HashSet<String> = [
            "c21k", "c21s", "c21e", "c21d", "c216", "c214", "c215", "c21h", "c21u", "c21g",
            "c21f", "c217", "c21c", "c219", "c213", "c21b", "c218", "c212", "c210", "c211",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(refined, expected);
        Ok(())
    }

    #[test]
    fn test_cover_radius_known() -> Result<(), GeohashError> {
        let cover = cover_radius(45.37, -121.7, 50_000.0)?;
        assert_eq!(cover.len(), 24);
        assert!(cover.iter().filter(|h| h.starts_with("9rc")).count() == 4);
        assert!(covers(&cover, &bounding_box(45.37, -121.7, 50_000.0)?)?);
        Ok(())
    }

    #[test]
    fn test_cover_is_tight_for_known_queries() -> Result<(), GeohashError> {
        let queries = [
            (45.37, -121.7, 50.0),
            (42.6, -5.6, 1000.0),
            (-33.87, 151.21, 5000.0),
            (51.5, -0.126, 20_000.0),
            (0.0, 179.9, 30_000.0),
            (45.37, -121.7, 50_000.0),
        ];
        for (lat, lon, radius) in queries {
            let cover = cover_radius(lat, lon, radius)?;
            let circle = PI * radius * radius;
            assert!(total_area(&cover)? < 5.0 * circle, "{} {} {}", lat, lon, radius);
        }
        let areas = areas_by_radius(45.37, -121.7, 50_000.0)?;
        assert!(total_area(&areas)? < 5.0 * PI * 50_000.0 * 50_000.0);
        Ok(())
    }

    #[test]
    fn test_radius_query_from_coord() -> Result<(), GeohashError> {
        let query = RadiusQuery::from_coord(&(-121.7, 45.37), 50_000.0)?;
        assert_eq!(query, RadiusQuery::new(45.37, -121.7, 50_000.0)?);
        assert_eq!(query.areas()?, areas_by_radius(45.37, -121.7, 50_000.0)?);
        assert_eq!(query.lat(), 45.37);
        assert_eq!(query.lon(), -121.7);
        assert_eq!(query.radius_meters(), 50_000.0);
        Ok(())
    }

    #[test]
    fn test_radius_query_deserialize_validates() -> Result<(), GeohashError> {
        let bad_radius = serde_json::from_str::<RadiusQuery>(
            r#"{"lat":10,"lon":10,"radius_meters":-5}"#,
        );
        assert!(bad_radius.is_err());
        let bad_lat =
            serde_json::from_str::<RadiusQuery>(r#"{"lat":95,"lon":10,"radius_meters":50}"#);
        assert!(bad_lat.is_err());

        let query = RadiusQuery::new(45.37, -121.7, 50.0)?;
        let json =
            serde_json::to_string(&query).map_err(|e| GeohashError::IoError(e.to_string()))?;
        let back: RadiusQuery =
            serde_json::from_str(&json).map_err(|e| GeohashError::IoError(e.to_string()))?;
        assert_eq!(back, query);
        assert_eq!(back.areas()?, ["c216nek", "c216nem"]);
        Ok(())
    }

    proptest! {
        #[test]
        fn areas_cover_radius_box(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            exponent in 0.0f64..6.5,
        ) {
            let radius = 10f64.powf(exponent);
            let areas = areas_by_radius(lat, lon, radius).unwrap();
            let target = bounding_box(lat, lon, radius).unwrap();
            prop_assert!(!areas.is_empty() && areas.len() <= 9);
            prop_assert!(covers(&areas, &target).unwrap());
        }

        #[test]
        fn cover_stays_sound_after_refinement(
            lat in -80.0f64..=80.0,
            lon in -180.0f64..=180.0,
            radius in 100.0f64..100_000.0,
        ) {
            let cover = cover_radius(lat, lon, radius).unwrap();
            let target = bounding_box(lat, lon, radius).unwrap();
            prop_assert!(covers(&cover, &target).unwrap());
        }

        #[test]
        fn center_cell_contains_query_point(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            radius in 1.0f64..1_000_000.0,
        ) {
            let areas = areas_by_radius(lat, lon, radius).unwrap();
            prop_assert!(decode(&areas[0]).unwrap().contains(&(lon, lat)));
        }
    }
}
