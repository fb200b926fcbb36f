use crate::coord::Coordinate;
use crate::index::constants::{DEG_LAT_IN_METERS, LAT_RANGE, LON_RANGE};
use geo_types::{Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle in degrees.
///
/// Decoded geohash cells always satisfy `south < north` and `west < east`.
/// Boxes produced by [`crate::bounding_box`] are not clamped to the world and
/// may extend past ±90 latitude or ±180 longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// The whole world, which is also the cell of the empty geohash.
    pub const WORLD: BoundingBox = BoundingBox {
        south: LAT_RANGE[0],
        west: LON_RANGE[0],
        north: LAT_RANGE[1],
        east: LON_RANGE[1],
    };

    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Center of the box as a `(lon, lat)` point.
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Returns true if the coordinate lies inside the box or on its edge.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.lat())
            && (self.west..=self.east).contains(&coord.lon())
    }

    /// Returns true if the interiors of the two boxes overlap.
    ///
    /// Longitudes are compared modulo 360 so a box reaching past the
    /// antimeridian still meets cells on the other side.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.south >= other.north || self.north <= other.south {
            return false;
        }
        [-360.0, 0.0, 360.0]
            .iter()
            .any(|shift| self.west < other.east + shift && self.east > other.west + shift)
    }

    /// Approximate surface area in square meters on the mean sphere.
    pub fn area_m2(&self) -> f64 {
        let mid_lat = (self.south + self.north) / 2.0;
        self.height() * DEG_LAT_IN_METERS * self.width() * DEG_LAT_IN_METERS
            * mid_lat.to_radians().cos()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    /// Converts the box to a closed 5-point polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_box() {
        let world = BoundingBox::WORLD;
        assert_eq!(world.height(), 180.0);
        assert_eq!(world.width(), 360.0);
        assert_eq!(world.center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_contains_edges() {
        let bbox = BoundingBox::new(10.0, 20.0, 11.0, 21.0);
        assert!(bbox.contains(&(20.0, 10.0)));
        assert!(bbox.contains(&Point::new(20.5, 10.5)));
        assert!(!bbox.contains(&(19.9, 10.5)));
    }

    #[test]
    fn test_intersects_requires_interior_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let touching = BoundingBox::new(1.0, 0.0, 2.0, 1.0);
        let overlapping = BoundingBox::new(0.5, 0.5, 1.5, 1.5);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
    }

    #[test]
    fn test_intersects_across_antimeridian() {
        let east_edge = BoundingBox::new(0.0, 179.0, 1.0, 180.0);
        let query = BoundingBox::new(0.2, -180.5, 0.8, -179.5);
        assert!(east_edge.intersects(&query));
    }

    #[test]
    fn test_polygon_is_closed() {
        let polygon = BoundingBox::new(0.0, 0.0, 1.0, 2.0).to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }

    #[test]
    fn test_area_shrinks_with_latitude() {
        let equator = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let north = BoundingBox::new(60.0, 0.0, 61.0, 1.0);
        assert!(north.area_m2() < equator.area_m2());
        assert!((equator.area_m2() / (DEG_LAT_IN_METERS * DEG_LAT_IN_METERS) - 1.0).abs() < 0.001);
    }
}
