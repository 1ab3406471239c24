//! Grid cell addressing.

use std::fmt;

/// Index of one grid cell as `(lat, lon)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpatialIndexPair {
    /// Latitude row index.
    pub lat: usize,
    /// Longitude column index.
    pub lon: usize,
}

impl SpatialIndexPair {
    /// Creates a new cell index.
    pub fn new(lat: usize, lon: usize) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for SpatialIndexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lat {}, lon {})", self.lat, self.lon)
    }
}
