//! Rectangular partitioning of grid axes into chunks.

use std::fmt;
use std::ops::Range;

use crate::config::ExecutorConfig;
use crate::error::CpaError;

/// Which input a chunk specification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRole {
    /// The response (target) grid.
    Response,
    /// The predictor grid.
    Predictor,
}

impl fmt::Display for GridRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridRole::Response => f.write_str("response"),
            GridRole::Predictor => f.write_str("predictor"),
        }
    }
}

/// Chunk sizes along the `lat` and `lon` axes of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    lat: usize,
    lon: usize,
}

impl ChunkSpec {
    /// Creates a chunk spec of `lat x lon` cells.
    pub fn new(lat: usize, lon: usize) -> Self {
        Self { lat, lon }
    }

    /// Latitude chunk size.
    pub fn lat(&self) -> usize {
        self.lat
    }

    /// Longitude chunk size.
    pub fn lon(&self) -> usize {
        self.lon
    }

    /// Checks that both sizes lie in `1..=len` of their axis.
    ///
    /// # Errors
    ///
    /// Returns [`CpaError::EmptyGrid`] if an axis has length zero, otherwise
    /// [`CpaError::ChunkSizeInvalid`] for the first offending axis.
    pub fn validate(&self, grid: GridRole, n_lat: usize, n_lon: usize) -> Result<(), CpaError> {
        for (axis, size, len) in [("lat", self.lat, n_lat), ("lon", self.lon, n_lon)] {
            if len == 0 {
                return Err(CpaError::EmptyGrid { grid, axis });
            }
            if size == 0 || size > len {
                return Err(CpaError::ChunkSizeInvalid {
                    grid,
                    axis,
                    size,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// One rectangular block of a grid, as global index ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Ordinal of this chunk within its partition.
    pub index: usize,
    /// Latitude index range.
    pub lat: Range<usize>,
    /// Longitude index range.
    pub lon: Range<usize>,
}

impl Chunk {
    /// Number of cells in the chunk.
    pub fn n_cells(&self) -> usize {
        self.lat.len() * self.lon.len()
    }
}

/// Splits an `n_lat x n_lon` grid into chunks of at most `spec` cells.
///
/// Chunks are contiguous, disjoint and cover the grid exactly; they are
/// ordered lat-major and edge chunks may be smaller.
///
/// # Errors
///
/// Returns [`CpaError::ChunkSizeInvalid`] if `spec` is not valid for the grid.
pub fn partition(
    grid: GridRole,
    n_lat: usize,
    n_lon: usize,
    spec: ChunkSpec,
) -> Result<Vec<Chunk>, CpaError> {
    spec.validate(grid, n_lat, n_lon)?;

    let mut chunks = Vec::with_capacity(n_lat.div_ceil(spec.lat) * n_lon.div_ceil(spec.lon));
    for lat_start in (0..n_lat).step_by(spec.lat) {
        let lat = lat_start..(lat_start + spec.lat).min(n_lat);
        for lon_start in (0..n_lon).step_by(spec.lon) {
            let lon = lon_start..(lon_start + spec.lon).min(n_lon);
            chunks.push(Chunk {
                index: chunks.len(),
                lat: lat.clone(),
                lon,
            });
        }
    }
    Ok(chunks)
}

/// Validated partition of both grids.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPlan {
    response: Vec<Chunk>,
    predictor: Vec<Chunk>,
}

impl ChunkPlan {
    /// Response grid chunks.
    pub fn response(&self) -> &[Chunk] {
        &self.response
    }

    /// Predictor grid chunks.
    pub fn predictor(&self) -> &[Chunk] {
        &self.predictor
    }

    /// Number of chunk-pair tasks.
    pub fn n_tasks(&self) -> usize {
        self.response.len() * self.predictor.len()
    }

    /// Every `(response chunk, predictor chunk)` ordinal pair, response-major.
    pub fn tasks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.response.len())
            .flat_map(move |r| (0..self.predictor.len()).map(move |p| (r, p)))
    }
}

/// Validates shapes and chunk specs and partitions both grids.
///
/// Shapes are `(time, lat, lon)`. Nothing is computed.
///
/// # Errors
///
/// Returns [`CpaError::DimensionMismatch`] if the time lengths differ, then
/// [`CpaError::ChunkSizeInvalid`] for an invalid chunk spec.
pub fn plan(
    response_shape: (usize, usize, usize),
    predictor_shape: (usize, usize, usize),
    config: &ExecutorConfig,
) -> Result<ChunkPlan, CpaError> {
    let (rt, ry, rx) = response_shape;
    let (pt, py, px) = predictor_shape;
    if rt != pt {
        return Err(CpaError::DimensionMismatch {
            axis: "time",
            response: rt,
            predictor: pt,
        });
    }

    Ok(ChunkPlan {
        response: partition(GridRole::Response, ry, rx, config.response_chunks())?,
        predictor: partition(GridRole::Predictor, py, px, config.predictor_chunks())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_exact() {
        let chunks = partition(GridRole::Response, 4, 4, ChunkSpec::new(2, 2)).unwrap();
        assert_eq!(chunks.len(), 4);
        assert_eq!(
            chunks[1],
            Chunk {
                index: 1,
                lat: 0..2,
                lon: 2..4
            }
        );
        assert_eq!(chunks[2].lat, 2..4);
        assert_eq!(chunks[2].lon, 0..2);
    }

    #[test]
    fn test_partition_ragged_edges() {
        let chunks = partition(GridRole::Response, 5, 3, ChunkSpec::new(2, 2)).unwrap();
        // lat: 0..2, 2..4, 4..5; lon: 0..2, 2..3
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[5].lat, 4..5);
        assert_eq!(chunks[5].lon, 2..3);
        let total: usize = chunks.iter().map(Chunk::n_cells).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_partition_covers_each_cell_once() {
        let (ny, nx) = (7, 5);
        let chunks = partition(GridRole::Predictor, ny, nx, ChunkSpec::new(3, 2)).unwrap();
        let mut seen = vec![0u8; ny * nx];
        for c in &chunks {
            for j in c.lat.clone() {
                for i in c.lon.clone() {
                    seen[j * nx + i] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_partition_whole_grid() {
        let chunks = partition(GridRole::Response, 3, 4, ChunkSpec::new(3, 4)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].n_cells(), 12);
    }

    #[test]
    fn test_validate_zero() {
        let err = ChunkSpec::new(0, 1).validate(GridRole::Response, 2, 2).unwrap_err();
        assert_eq!(
            err,
            CpaError::ChunkSizeInvalid {
                grid: GridRole::Response,
                axis: "lat",
                size: 0,
                len: 2
            }
        );
    }

    #[test]
    fn test_validate_too_large() {
        let err = ChunkSpec::new(1, 5).validate(GridRole::Predictor, 2, 4).unwrap_err();
        assert_eq!(
            err,
            CpaError::ChunkSizeInvalid {
                grid: GridRole::Predictor,
                axis: "lon",
                size: 5,
                len: 4
            }
        );
    }

    #[test]
    fn test_validate_empty_grid() {
        let err = ChunkSpec::new(1, 1).validate(GridRole::Predictor, 3, 0).unwrap_err();
        assert_eq!(
            err,
            CpaError::EmptyGrid {
                grid: GridRole::Predictor,
                axis: "lon"
            }
        );
        assert!(matches!(
            partition(GridRole::Response, 0, 2, ChunkSpec::new(1, 1)),
            Err(CpaError::EmptyGrid { axis: "lat", .. })
        ));
    }

    #[test]
    fn test_plan_tasks_cartesian() {
        let config = ExecutorConfig::new(ChunkSpec::new(1, 2), ChunkSpec::new(1, 1));
        let plan = plan((10, 2, 2), (10, 1, 3), &config).unwrap();
        assert_eq!(plan.response().len(), 2);
        assert_eq!(plan.predictor().len(), 3);
        assert_eq!(plan.n_tasks(), 6);
        let tasks: Vec<_> = plan.tasks().collect();
        assert_eq!(tasks[0], (0, 0));
        assert_eq!(tasks[3], (1, 0));
        assert_eq!(tasks.len(), 6);
    }

    #[test]
    fn test_plan_time_checked_first() {
        // Invalid chunk spec too, but the time mismatch is reported.
        let config = ExecutorConfig::new(ChunkSpec::new(0, 0), ChunkSpec::new(1, 1));
        let err = plan((10, 2, 2), (11, 1, 1), &config).unwrap_err();
        assert!(matches!(err, CpaError::DimensionMismatch { .. }));
    }
}
