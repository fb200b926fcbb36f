/// Error type for geohash-rs operations.
#[derive(Debug, PartialEq)]
pub enum GeohashError {
    /// The geohash contains a character outside the base-32 alphabet.
    InvalidCharacter(char),
    /// Latitude is outside [-90, 90] or not a number.
    InvalidLatitude(f64),
    /// Longitude is outside [-180, 180] or not a number.
    InvalidLongitude(f64),
    /// Radius must be a positive, finite number of meters.
    InvalidRadius(f64),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for GeohashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeohashError::InvalidCharacter(c) => write!(f, "Invalid geohash character: {:?}", c),
            GeohashError::InvalidLatitude(lat) => write!(f, "Invalid latitude: {}", lat),
            GeohashError::InvalidLongitude(lon) => write!(f, "Invalid longitude: {}", lon),
            GeohashError::InvalidRadius(r) => write!(f, "Invalid radius: {}", r),
            GeohashError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeohashError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            GeohashError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeohashError {}
