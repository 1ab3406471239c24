//! Error types for the cpa-grid crate.

/// Error type for all fallible operations in the cpa-grid crate.
///
/// Covers shape and naming problems detected while building a
/// [`LabeledSeries3D`](crate::LabeledSeries3D), and the time-length check
/// performed when aligning two grids.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when the data does not have exactly three axes.
    #[error("expected 3 axes (time, lat, lon), got {got}")]
    AxisCount {
        /// Number of axes found.
        got: usize,
    },

    /// Returned when the axis names are not exactly `time`, `lat` and `lon`.
    #[error("axis names must be a permutation of (time, lat, lon), got {names:?}")]
    AxisNames {
        /// The names that were supplied.
        names: Vec<String>,
    },

    /// Returned when a coordinate label sequence does not match its axis length.
    #[error("coordinate '{axis}' has {labels} labels but the axis has length {len}")]
    CoordinateLength {
        /// Axis name.
        axis: &'static str,
        /// Number of coordinate labels.
        labels: usize,
        /// Axis length in the data.
        len: usize,
    },

    /// Returned when a lat/lon coordinate value is NaN or infinite.
    #[error("coordinate '{axis}' has a non-finite value at index {index}")]
    NonFiniteCoordinate {
        /// Axis name.
        axis: &'static str,
        /// Position of the offending label.
        index: usize,
    },

    /// Returned when two grids are aligned but their time axes differ in length.
    #[error("time length mismatch: {expected} vs {got}")]
    TimeLength {
        /// Length of the reference time axis.
        expected: usize,
        /// Length of the time axis being aligned.
        got: usize,
    },
}
