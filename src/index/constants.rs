/// The base-32 geohash alphabet, indexed by 5-bit value
pub const ALPHABET: &str = "0123456789bcdefghjkmnpqrstuvwxyz";

/// Bit masks for the 5 bits of a character, most significant first
pub const BIT_MASKS: [u8; 5] = [0x10, 0x08, 0x04, 0x02, 0x01];

/// Number of bits each geohash character carries
pub(crate) const BITS_PER_CHAR: usize = 5;

/// Precision used when the caller has no preference
pub const DEFAULT_PRECISION: usize = 12;

/// Mean Earth radius in meters used for radius estimation
pub const EARTH_RADIUS_M: f64 = 6372797.560856;

/// Half the Earth's circumference in spherical Mercator meters
pub const MERCATOR_MAX: f64 = 20037726.37;

/// Length of one degree of latitude in meters on the mean sphere
pub const DEG_LAT_IN_METERS: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / 360.0;

/// Latitude range [min, max]
pub const LAT_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude range [min, max]
pub const LON_RANGE: [f64; 2] = [-180.0, 180.0];
