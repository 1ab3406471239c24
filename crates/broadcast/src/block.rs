//! Independent, cell-major copies of rectangular grid blocks.

use std::ops::Range;

use cpa_grid::LabeledSeries3D;
use ndarray::s;

use crate::error::BroadcastError;

/// Time series of a rectangular `(lat, lon)` block, copied out of its grid.
///
/// Storage is cell-major `(lat, lon, time)` so every series is one
/// contiguous slice. A block owns its buffer and never refers back to the
/// grid it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBlock {
    lat: Range<usize>,
    lon: Range<usize>,
    n_time: usize,
    values: Vec<f64>,
}

impl SeriesBlock {
    /// Copies the block `lat x lon` (global index ranges) out of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError::BlockOutOfBounds`] if a range is empty,
    /// reversed or reaches past the grid edge.
    pub fn extract(
        grid: &LabeledSeries3D,
        lat: Range<usize>,
        lon: Range<usize>,
    ) -> Result<Self, BroadcastError> {
        check_range("lat", &lat, grid.n_lat())?;
        check_range("lon", &lon, grid.n_lon())?;

        let view = grid.values();
        let block = view.slice(s![.., lat.clone(), lon.clone()]);
        // (time, lat, lon) -> (lat, lon, time); iter() walks the permuted
        // view in logical row-major order.
        let values: Vec<f64> = block.permuted_axes([1, 2, 0]).iter().copied().collect();

        Ok(Self {
            lat,
            lon,
            n_time: grid.n_time(),
            values,
        })
    }

    /// Copies the whole grid.
    pub fn whole(grid: &LabeledSeries3D) -> Self {
        let view = grid.values();
        Self {
            lat: 0..grid.n_lat(),
            lon: 0..grid.n_lon(),
            n_time: grid.n_time(),
            values: view.permuted_axes([1, 2, 0]).iter().copied().collect(),
        }
    }

    /// Global latitude index range covered by this block.
    pub fn lat_range(&self) -> Range<usize> {
        self.lat.clone()
    }

    /// Global longitude index range covered by this block.
    pub fn lon_range(&self) -> Range<usize> {
        self.lon.clone()
    }

    /// Number of latitude rows in the block.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude columns in the block.
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// Number of timesteps per series.
    pub fn n_time(&self) -> usize {
        self.n_time
    }

    /// Series at block-local cell `(lat, lon)`.
    ///
    /// # Panics
    ///
    /// Panics if the local indices are outside the block.
    pub fn series(&self, lat: usize, lon: usize) -> &[f64] {
        assert!(
            lat < self.n_lat() && lon < self.n_lon(),
            "series: local cell ({lat}, {lon}) outside block"
        );
        let start = (lat * self.n_lon() + lon) * self.n_time;
        &self.values[start..start + self.n_time]
    }
}

fn check_range(axis: &'static str, range: &Range<usize>, len: usize) -> Result<(), BroadcastError> {
    if range.start >= range.end || range.end > len {
        return Err(BroadcastError::BlockOutOfBounds {
            axis,
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}
