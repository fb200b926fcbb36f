use crate::coord::{validate_lat, validate_lon};
use crate::error::GeohashError;
use crate::geom::BoundingBox;
use crate::index::constants::{ALPHABET, BIT_MASKS, LAT_RANGE, LON_RANGE};
use geo_types::Point;

/// One axis of the cell being narrowed, `low < high`.
#[derive(Debug, Clone, Copy)]
struct Interval {
    low: f64,
    high: f64,
}

impl Interval {
    fn new(range: [f64; 2]) -> Self {
        Self {
            low: range[0],
            high: range[1],
        }
    }

    fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Keeps the upper half when `upper` is set, the lower half otherwise.
    fn halve(&mut self, upper: bool) {
        let mid = self.mid();
        if upper {
            self.low = mid;
        } else {
            self.high = mid;
        }
    }
}

/// Latitude and longitude intervals, alternating which one is narrowed.
///
/// Bit 0 always narrows longitude.
struct Cursor {
    lat: Interval,
    lon: Interval,
    on_lon: bool,
}

impl Cursor {
    fn world() -> Self {
        Self {
            lat: Interval::new(LAT_RANGE),
            lon: Interval::new(LON_RANGE),
            on_lon: true,
        }
    }

    fn current(&mut self) -> &mut Interval {
        if self.on_lon { &mut self.lon } else { &mut self.lat }
    }

    fn step(&mut self, upper: bool) {
        self.current().halve(upper);
        self.on_lon = !self.on_lon;
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.lat.low, self.lon.low, self.lat.high, self.lon.high)
    }
}

/// Looks up the 5-bit value of a geohash character, case-insensitively.
pub(crate) fn char_value(c: char) -> Result<u8, GeohashError> {
    let lower = c.to_ascii_lowercase();
    ALPHABET
        .chars()
        .position(|a| a == lower)
        .map(|idx| idx as u8)
        .ok_or(GeohashError::InvalidCharacter(c))
}

/// Maps a 5-bit value (0-31) to its geohash character.
pub(crate) fn value_char(value: u8) -> char {
    ALPHABET.as_bytes()[(value & 0x1f) as usize] as char
}

/// Validates a geohash and returns it in canonical lowercase form.
pub fn normalize(hash: &str) -> Result<String, GeohashError> {
    hash.chars()
        .map(|c| char_value(c).map(value_char))
        .collect()
}

/// Encodes a WGS84 coordinate into a geohash of `precision` characters.
///
/// Each character carries 5 bits; bits alternate between longitude and
/// latitude starting with longitude. A coordinate lying exactly on a
/// midpoint falls into the lower half. A precision of 0 yields the empty
/// (whole world) hash.
///
/// # Example
/// ```
/// use geohash_rs::encode;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// assert_eq!(encode(42.6, -5.6, 5)?, "ezs42");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`GeohashError::InvalidLatitude`] - latitude outside [-90, 90]
/// - [`GeohashError::InvalidLongitude`] - longitude outside [-180, 180]
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String, GeohashError> {
    let lat = validate_lat(lat)?;
    let lon = validate_lon(lon)?;

    let mut cursor = Cursor::world();
    let mut hash = String::with_capacity(precision);
    for _ in 0..precision {
        let mut value = 0u8;
        for mask in BIT_MASKS {
            let target = if cursor.on_lon { lon } else { lat };
            let upper = target > cursor.current().mid();
            if upper {
                value |= mask;
            }
            cursor.step(upper);
        }
        hash.push(value_char(value));
    }
    Ok(hash)
}

/// Decodes a geohash into the bounding box of its cell.
///
/// Input is case-insensitive. The empty hash decodes to the whole world.
///
/// # Example
/// ```
/// use geohash_rs::decode;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let bbox = decode("ezs42")?;
/// assert_eq!(bbox.south, 42.5830078125);
/// assert_eq!(bbox.east, -5.5810546875);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`GeohashError::InvalidCharacter`] - a character is outside the alphabet
pub fn decode(hash: &str) -> Result<BoundingBox, GeohashError> {
    let mut cursor = Cursor::world();
    for c in hash.chars() {
        let value = char_value(c)?;
        for mask in BIT_MASKS {
            cursor.step(value & mask != 0);
        }
    }
    Ok(cursor.bounds())
}

/// Decodes a geohash to the center of its cell as a `(lon, lat)` point.
pub fn decode_center(hash: &str) -> Result<Point<f64>, GeohashError> {
    Ok(decode(hash)?.center())
}
