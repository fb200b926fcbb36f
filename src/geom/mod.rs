mod bbox;
mod parse;

pub use bbox::BoundingBox;
pub use parse::{parse_geojson, parse_geometry, parse_wkt};
