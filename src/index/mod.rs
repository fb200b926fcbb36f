mod codec;
pub mod constants;
mod neighbor;
mod radius;

pub use codec::{decode, decode_center, encode, normalize};
pub use constants::{
    ALPHABET, BIT_MASKS, DEFAULT_PRECISION, DEG_LAT_IN_METERS, EARTH_RADIUS_M, MERCATOR_MAX,
};
pub use neighbor::{BORDERS, Direction, NEIGHBORS, Parity, adjacent, children, neighbors, parent};
pub use radius::{
    RadiusQuery, areas_by_radius, bounding_box, cell_dimensions, cover_radius,
    estimate_precision, refine_to_box,
};
