pub mod csv;
pub mod geojson;

pub use csv::{CoordinateSource, CsvGeohashConfig, CsvToGeohash, GeometryFormat, csv_to_geohash_csv};
pub use geojson::GeohashCellsToGeoJson;
