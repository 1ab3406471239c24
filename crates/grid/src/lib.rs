//! Labelled `(time, lat, lon)` grids for pairwise CPA.
//!
//! A [`LabeledSeries3D`] is the input unit of the broadcaster and the chunked
//! executor: a 3-D field in canonical `(time, lat, lon)` order together with
//! its coordinate labels. Cells are addressed by [`SpatialIndexPair`].

mod cell;
mod error;
mod series;

pub use cell::SpatialIndexPair;
pub use error::GridError;
pub use series::{AXES, LabeledSeries3D};

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Builds `n` consecutive daily timestamps at midnight, starting at `start`.
pub fn daily_time_axis(start: NaiveDate, n: usize) -> Vec<NaiveDateTime> {
    let origin = start.and_time(chrono::NaiveTime::MIN);
    (0..n)
        .map(|d| origin + Duration::days(d as i64))
        .collect()
}
