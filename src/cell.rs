use crate::coord::{Coordinate, validate_lat, validate_lon};
use crate::error::GeohashError;
use crate::geom::BoundingBox;
use crate::index::constants::LON_RANGE;
use crate::index::{
    Direction, adjacent, cell_dimensions, children, decode, encode, neighbors, normalize, parent,
};
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A single geohash cell.
///
/// Each `GeohashCell` pairs a canonical lowercase hash with the WGS84
/// rectangle it covers.
///
/// # Example
///
/// ```
/// use geohash_rs::GeohashCell;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// // Create from a (lon, lat) coordinate
/// let cell = GeohashCell::from_wgs84(&(-5.6, 42.6), 5)?;
/// assert_eq!(cell.hash, "ezs42");
///
/// // Convert the cell to a polygon for GIS operations
/// let polygon = cell.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeohashCell")]
pub struct GeohashCell {
    /// Canonical lowercase geohash
    pub hash: String,
    /// Extent of the cell in WGS84 degrees
    pub bounds: BoundingBox,
}

/// Serialized `bounds` are ignored; they are always recomputed from the hash.
#[derive(Deserialize)]
struct RawGeohashCell {
    hash: String,
}

impl TryFrom<RawGeohashCell> for GeohashCell {
    type Error = GeohashError;

    fn try_from(raw: RawGeohashCell) -> Result<Self, Self::Error> {
        Self::from_hash(&raw.hash)
    }
}

/// Shifts a longitude at most one turn back into [-180, 180].
fn wrap_lon(lon: f64) -> f64 {
    if lon > LON_RANGE[1] {
        lon - 360.0
    } else if lon < LON_RANGE[0] {
        lon + 360.0
    } else {
        lon
    }
}

impl GeohashCell {
    /// Create a GeohashCell from a geohash string (any case).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::GeohashCell;
    ///
    /// # fn main() -> Result<(), geohash_rs::GeohashError> {
    /// let cell = GeohashCell::from_hash("C216NE")?;
    /// assert_eq!(cell.hash, "c216ne");
    /// assert_eq!(cell.precision(), 6);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_hash(hash: &str) -> Result<Self, GeohashError> {
        let hash = normalize(hash)?;
        let bounds = decode(&hash)?;
        Ok(Self { hash, bounds })
    }

    /// Create the cell of `precision` characters containing a WGS84 coordinate.
    pub fn from_wgs84(coord: &impl Coordinate, precision: usize) -> Result<Self, GeohashError> {
        let hash = encode(coord.lat(), coord.lon(), precision)?;
        let bounds = decode(&hash)?;
        Ok(Self { hash, bounds })
    }

    /// Create GeohashCells along a LineString of `(lon, lat)` coordinates.
    ///
    /// Samples points every half cell along each segment and returns the
    /// unique cells visited, in order of first visit. Each segment takes the
    /// shorter way round, so one crossing the antimeridian stays short.
    pub fn from_line_string(line: &LineString, precision: usize) -> Result<Vec<Self>, GeohashError> {
        let (cell_height, cell_width) = cell_dimensions(precision);
        let step_size = cell_height.min(cell_width) * 0.5;

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<GeohashCell> = Vec::new();
        let mut visit = |lon: f64, lat: f64| -> Result<(), GeohashError> {
            let hash = encode(lat, lon, precision)?;
            if seen.insert(hash.clone()) {
                let bounds = decode(&hash)?;
                cells.push(GeohashCell { hash, bounds });
            }
            Ok(())
        };

        if let [only] = line.0.as_slice() {
            visit(only.x, only.y)?;
        }
        for window in line.0.windows(2) {
            let (start, end) = (&window[0], &window[1]);
            for c in [start, end] {
                validate_lat(c.y)?;
                validate_lon(c.x)?;
            }
            let mut dx = end.x - start.x;
            if dx > 180.0 {
                dx -= 360.0;
            } else if dx <= -180.0 {
                dx += 360.0;
            }
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(wrap_lon(start.x + t * dx), start.y + t * dy)?;
            }
        }

        Ok(cells)
    }

    /// Create GeohashCells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points and polygon centroids produce a single cell; lines and
    /// collections may produce many.
    pub fn from_geometry(geom: Geometry<f64>, precision: usize) -> Result<Vec<Self>, GeohashError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt, precision)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_wgs84(pt, precision))
                .collect(),
            Geometry::LineString(line) => Self::from_line_string(&line, precision),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line, precision)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => poly
                .centroid()
                .map(|c| Self::from_wgs84(&c, precision))
                .into_iter()
                .collect(),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|c| Self::from_wgs84(&c, precision))
                .collect(),
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g, precision)?);
                }
                Ok(all_cells)
            }
            _ => Err(GeohashError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Number of characters in the hash.
    pub fn precision(&self) -> usize {
        self.hash.len()
    }

    /// Center of the cell as a `(lon, lat)` point.
    pub fn center(&self) -> Point<f64> {
        self.bounds.center()
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains(coord)
    }

    /// The same-precision cell in `direction`, or `None` past a pole.
    pub fn adjacent(&self, direction: Direction) -> Result<Option<Self>, GeohashError> {
        adjacent(&self.hash, direction)?
            .map(|hash| Self::from_hash(&hash))
            .transpose()
    }

    /// The surrounding cells, clockwise from Top.
    pub fn neighbors(&self) -> Result<Vec<Self>, GeohashError> {
        neighbors(&self.hash)?
            .iter()
            .map(|hash| Self::from_hash(hash))
            .collect()
    }

    /// The 32 cells one character longer.
    pub fn children(&self) -> Result<Vec<Self>, GeohashError> {
        children(&self.hash)?
            .iter()
            .map(|hash| Self::from_hash(hash))
            .collect()
    }

    /// The enclosing cell, or `None` for the world cell.
    pub fn parent(&self) -> Result<Option<Self>, GeohashError> {
        parent(&self.hash)?
            .map(|hash| Self::from_hash(&hash))
            .transpose()
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Suitable for spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }
}

impl fmt::Display for GeohashCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

impl FromStr for GeohashCell {
    type Err = GeohashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hash(s)
    }
}
