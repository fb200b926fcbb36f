use crate::error::GeohashError;
use crate::index::codec::{normalize, value_char};
use crate::index::constants::ALPHABET;
use serde::{Deserialize, Serialize};

/// A compass direction between edge-adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// Top and Bottom cross latitude lines and can run off a pole.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}

/// Parity of a hash length; decides which table row applies to its last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of_len(len: usize) -> Self {
        if len % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    fn index(self) -> usize {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

/// Replacement characters, indexed `[direction][parity]`.
///
/// The character at the position of the last hash character in [`ALPHABET`]
/// is the last character of the neighbour in that direction.
pub const NEIGHBORS: [[&str; 2]; 4] = [
    // Top
    [
        "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
        "bc01fg45238967deuvhjyznpkmstqrwx",
    ],
    // Right
    [
        "bc01fg45238967deuvhjyznpkmstqrwx",
        "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
    ],
    // Bottom
    [
        "14365h7k9dcfesgujnmqp0r2twvyx8zb",
        "238967debc01fg45kmstqrwxuvhjyznp",
    ],
    // Left
    [
        "238967debc01fg45kmstqrwxuvhjyznp",
        "14365h7k9dcfesgujnmqp0r2twvyx8zb",
    ],
];

/// Last characters sitting on the edge of their parent cell, indexed `[direction][parity]`.
pub const BORDERS: [[&str; 2]; 4] = [
    // Top
    ["prxz", "bcfguvyz"],
    // Right
    ["bcfguvyz", "prxz"],
    // Bottom
    ["028b", "0145hjnp"],
    // Left
    ["0145hjnp", "028b"],
];

/// The ring walk used by [`neighbors`], clockwise from Top.
const RING: [(Direction, Direction); 4] = [
    (Direction::Top, Direction::Right),
    (Direction::Right, Direction::Bottom),
    (Direction::Bottom, Direction::Left),
    (Direction::Left, Direction::Top),
];

/// Returns the cell of the same precision adjacent in `direction`.
///
/// Returns `Ok(None)` when there is no such cell: moving Top off the north
/// pole row, Bottom off the south pole row, or any move from the empty
/// (whole world) hash. Left and Right wrap around the antimeridian.
///
/// # Example
/// ```
/// use geohash_rs::{Direction, adjacent};
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// assert_eq!(adjacent("dqcjq", Direction::Top)?, Some("dqcjw".to_string()));
/// assert_eq!(adjacent("z", Direction::Top)?, None);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`GeohashError::InvalidCharacter`] - a character is outside the alphabet
pub fn adjacent(hash: &str, direction: Direction) -> Result<Option<String>, GeohashError> {
    let mut chars: Vec<char> = normalize(hash)?.chars().collect();
    let neighbors = NEIGHBORS[direction.index()];
    let borders = BORDERS[direction.index()];

    // Replace characters from the end while the move keeps crossing the
    // border of the enclosing parent cell.
    let mut len = chars.len();
    while len > 0 {
        let parity = Parity::of_len(len).index();
        let last = chars[len - 1];
        let idx = neighbors[parity]
            .find(last)
            .ok_or(GeohashError::InvalidCharacter(last))?;
        chars[len - 1] = value_char(idx as u8);

        if !borders[parity].contains(last) {
            return Ok(Some(chars.into_iter().collect()));
        }
        len -= 1;
    }

    if chars.is_empty() || direction.is_vertical() {
        log::trace!("no {:?} neighbour for {:?}", direction, hash);
        return Ok(None);
    }
    Ok(Some(chars.into_iter().collect()))
}

/// Computes the 8 cells around `hash` without dropping any.
///
/// Order is Top, TopRight, Right, BottomRight, Bottom, BottomLeft, Left,
/// TopLeft; entries that run off a pole are `None`.
pub(crate) fn ring(hash: &str) -> Result<[Option<String>; 8], GeohashError> {
    let mut cells: [Option<String>; 8] = Default::default();
    for (i, (first, second)) in RING.into_iter().enumerate() {
        let side = adjacent(hash, first)?;
        let corner = match &side {
            Some(side) => adjacent(side, second)?,
            None => None,
        };
        cells[2 * i] = side;
        cells[2 * i + 1] = corner;
    }
    Ok(cells)
}

/// Returns the cells surrounding `hash`, clockwise from Top.
///
/// Cells that would lie beyond a pole are omitted, so pole rows yield fewer
/// than 8 entries. Duplicates are not removed.
///
/// # Example
/// ```
/// use geohash_rs::neighbors;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let mut cells = neighbors("dk")?;
/// cells.sort();
/// assert_eq!(cells, ["d5", "d7", "de", "dh", "dj", "dm", "ds", "dt"]);
/// # Ok(())
/// # }
/// ```
pub fn neighbors(hash: &str) -> Result<Vec<String>, GeohashError> {
    Ok(ring(hash)?.into_iter().flatten().collect())
}

/// Returns the 32 cells one character longer than `hash`, in alphabet order.
pub fn children(hash: &str) -> Result<Vec<String>, GeohashError> {
    let base = normalize(hash)?;
    Ok(ALPHABET
        .chars()
        .map(|c| {
            let mut child = String::with_capacity(base.len() + 1);
            child.push_str(&base);
            child.push(c);
            child
        })
        .collect())
}

/// Returns the enclosing cell one character shorter, or `None` for the world.
pub fn parent(hash: &str) -> Result<Option<String>, GeohashError> {
    let mut base = normalize(hash)?;
    Ok(base.pop().map(|_| base))
}
