use crate::error::GeohashError;
use crate::index::constants::{LAT_RANGE, LON_RANGE};
use geo_types::Point;

/// Trait for types that can provide WGS84 coordinates.
///
/// Implemented for `(lon, lat)` tuples and `geo_types::Point<f64>`, following
/// the x = longitude, y = latitude convention of `geo_types`.
/// This allows functions to accept either type.
pub trait Coordinate {
    /// Returns the longitude (x-coordinate).
    fn lon(&self) -> f64;
    /// Returns the latitude (y-coordinate).
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

/// Checks that a latitude lies in [-90, 90]. NaN is rejected.
pub fn validate_lat(lat: f64) -> Result<f64, GeohashError> {
    if (LAT_RANGE[0]..=LAT_RANGE[1]).contains(&lat) {
        Ok(lat)
    } else {
        Err(GeohashError::InvalidLatitude(lat))
    }
}

/// Checks that a longitude lies in [-180, 180]. NaN is rejected.
pub fn validate_lon(lon: f64) -> Result<f64, GeohashError> {
    if (LON_RANGE[0]..=LON_RANGE[1]).contains(&lon) {
        Ok(lon)
    } else {
        Err(GeohashError::InvalidLongitude(lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (-121.7, 45.37);
        assert_eq!(tuple.lon(), -121.7);
        assert_eq!(tuple.lat(), 45.37);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(-121.7, 45.37);
        assert_eq!(point.lon(), -121.7);
        assert_eq!(point.lat(), 45.37);
    }

    #[test]
    fn test_validate_bounds_inclusive() {
        assert_eq!(validate_lat(90.0), Ok(90.0));
        assert_eq!(validate_lat(-90.0), Ok(-90.0));
        assert_eq!(validate_lon(180.0), Ok(180.0));
        assert_eq!(validate_lon(-180.0), Ok(-180.0));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(validate_lat(90.5), Err(GeohashError::InvalidLatitude(90.5)));
        assert_eq!(
            validate_lon(-180.1),
            Err(GeohashError::InvalidLongitude(-180.1))
        );
        assert!(validate_lat(f64::NAN).is_err());
        assert!(validate_lon(f64::INFINITY).is_err());
    }
}
