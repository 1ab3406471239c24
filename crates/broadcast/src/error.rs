//! Error types for the cpa-broadcast crate.

use cpa_grid::SpatialIndexPair;
use cpa_stats::StatisticError;

/// Error type for all fallible operations in the cpa-broadcast crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BroadcastError {
    /// Returned when the response and predictor disagree on an axis that must
    /// be shared (the time axis).
    #[error("dimension '{axis}' mismatch: response {response}, predictor {predictor}")]
    DimensionMismatch {
        /// Name of the axis.
        axis: &'static str,
        /// Length in the response grid.
        response: usize,
        /// Length in the predictor grid.
        predictor: usize,
    },

    /// Returned when a requested block reaches past the edge of its grid.
    #[error("block {axis} range {start}..{end} exceeds grid length {len}")]
    BlockOutOfBounds {
        /// Axis name.
        axis: &'static str,
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Axis length of the grid.
        len: usize,
    },

    /// Returned when result coordinates do not match the result array shape.
    #[error("result axis '{axis}' has {labels} coordinates but length {len}")]
    ResultShape {
        /// Result axis name.
        axis: &'static str,
        /// Number of coordinate values.
        labels: usize,
        /// Axis length in the result array.
        len: usize,
    },

    /// The statistic failed for one pair of cells. Indices are global grid
    /// indices.
    #[error("statistic failed for response cell {response} and predictor cell {predictor}: {source}")]
    Statistic {
        /// Response grid cell.
        response: SpatialIndexPair,
        /// Predictor grid cell.
        predictor: SpatialIndexPair,
        /// The statistic's own error.
        source: StatisticError,
    },
}
