//! # geohash-rs
//!
//! There are currently four main entry points.
//!
//! ### 1. Encoding and decoding
//!
//! ```
//! use geohash_rs::{decode, encode};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let hash = encode(42.6, -5.6, 5)?;
//! assert_eq!(hash, "ezs42");
//!
//! let bounds = decode(&hash)?;
//! assert!(bounds.south <= 42.6 && 42.6 <= bounds.north);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Neighbours
//!
//! ```
//! use geohash_rs::{Direction, adjacent, neighbors};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! assert_eq!(adjacent("ezs42", Direction::Top)?.as_deref(), Some("ezs48"));
//! assert_eq!(neighbors("ezs42")?.len(), 8);
//!
//! // No cell lies beyond a pole
//! assert_eq!(adjacent("u", Direction::Top)?, None);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Radius search
//!
//! ```
//! use geohash_rs::{RadiusQuery, areas_by_radius};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let areas = areas_by_radius(45.37, -121.7, 50.0)?;
//! assert_eq!(areas, ["c216nek", "c216nem"]);
//!
//! // Finer cells trimmed to the search box
//! let cover = RadiusQuery::new(45.37, -121.7, 50_000.0)?.cover()?;
//! assert!(cover.iter().all(|h| h.len() == 4));
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. `GeohashCell` and CSV conversion
//!
//! ```
//! use geohash_rs::{GeohashCell, GeohashCellsToGeoJson};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let cell = GeohashCell::from_wgs84(&(-121.7, 45.37), 6)?;
//! let cells = cell.neighbors()?;
//! let geojson = cells.to_geojson_string();
//! assert!(geojson.contains("FeatureCollection"));
//! # Ok(())
//! # }
//! ```
//!
//! ```no_run
//! use geohash_rs::{CsvGeohashConfig, CsvToGeohash, GeometryFormat};
//!
//! let config = CsvGeohashConfig::new("geometry", 7)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! // Using trait method
//! "input.csv".to_geohash_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use cell::GeohashCell;
pub use coord::{Coordinate, validate_lat, validate_lon};
pub use error::GeohashError;
pub use geom::{BoundingBox, parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    ALPHABET, BIT_MASKS, BORDERS, DEFAULT_PRECISION, DEG_LAT_IN_METERS, Direction,
    EARTH_RADIUS_M, MERCATOR_MAX, NEIGHBORS, Parity, RadiusQuery, adjacent, areas_by_radius,
    bounding_box, cell_dimensions, children, cover_radius, decode, decode_center, encode,
    estimate_precision, neighbors, normalize, parent, refine_to_box,
};
pub use io::{
    CoordinateSource, CsvGeohashConfig, CsvToGeohash, GeohashCellsToGeoJson, GeometryFormat,
    csv_to_geohash_csv,
};

pub use geo_types;
