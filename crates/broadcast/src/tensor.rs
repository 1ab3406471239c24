//! The labelled 4-D pairwise result.

use cpa_grid::SpatialIndexPair;
use ndarray::{Array4, ArrayView2, ArrayView4, s};

use crate::error::BroadcastError;

/// Axis names of a [`PairwiseResultTensor`], in storage order.
pub const RESULT_DIMS: [&str; 4] = ["lon_tar", "lat_tar", "lon_pre", "lat_pre"];

/// Default variable name of a result.
pub const DEFAULT_RESULT_NAME: &str = "rainfall_cpa";

/// Statistic values for every (response cell, predictor cell) pair.
///
/// Axes are `(lon_tar, lat_tar, lon_pre, lat_pre)`: element `(i, j, x, y)`
/// scores the response series at response cell `(lat j, lon i)` against the
/// predictor series at predictor cell `(lat y, lon x)`. Each axis carries the
/// coordinate values of its source grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseResultTensor {
    name: String,
    values: Array4<f64>,
    lon_tar: Vec<f64>,
    lat_tar: Vec<f64>,
    lon_pre: Vec<f64>,
    lat_pre: Vec<f64>,
}

impl PairwiseResultTensor {
    /// Wraps a value array with its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError::ResultShape`] if a coordinate vector does
    /// not match the corresponding array axis.
    pub fn new(
        values: Array4<f64>,
        lon_tar: Vec<f64>,
        lat_tar: Vec<f64>,
        lon_pre: Vec<f64>,
        lat_pre: Vec<f64>,
    ) -> Result<Self, BroadcastError> {
        let (a, b, c, d) = values.dim();
        for (axis, labels, len) in [
            (RESULT_DIMS[0], lon_tar.len(), a),
            (RESULT_DIMS[1], lat_tar.len(), b),
            (RESULT_DIMS[2], lon_pre.len(), c),
            (RESULT_DIMS[3], lat_pre.len(), d),
        ] {
            if labels != len {
                return Err(BroadcastError::ResultShape { axis, labels, len });
            }
        }

        Ok(Self {
            name: DEFAULT_RESULT_NAME.to_string(),
            values,
            lon_tar,
            lat_tar,
            lon_pre,
            lat_pre,
        })
    }

    /// Sets the variable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axis names in storage order.
    pub fn dims(&self) -> [&'static str; 4] {
        RESULT_DIMS
    }

    /// Shape as `(lon_tar, lat_tar, lon_pre, lat_pre)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.values.dim()
    }

    /// Value at `(lon_tar, lat_tar, lon_pre, lat_pre)`, or `None` if out of bounds.
    pub fn get(&self, i: usize, j: usize, x: usize, y: usize) -> Option<f64> {
        self.values.get((i, j, x, y)).copied()
    }

    /// Scores of every predictor cell for one response cell, as a
    /// `(lon_pre, lat_pre)` view.
    pub fn predictor_map(&self, response: SpatialIndexPair) -> Option<ArrayView2<'_, f64>> {
        let (nx, ny, _, _) = self.shape();
        if response.lon >= nx || response.lat >= ny {
            return None;
        }
        Some(self.values.slice(s![response.lon, response.lat, .., ..]))
    }

    /// Borrowed view of all values.
    pub fn values(&self) -> ArrayView4<'_, f64> {
        self.values.view()
    }

    /// Consumes the result, returning the value array.
    pub fn into_values(self) -> Array4<f64> {
        self.values
    }

    /// Response longitudes.
    pub fn lon_tar(&self) -> &[f64] {
        &self.lon_tar
    }

    /// Response latitudes.
    pub fn lat_tar(&self) -> &[f64] {
        &self.lat_tar
    }

    /// Predictor longitudes.
    pub fn lon_pre(&self) -> &[f64] {
        &self.lon_pre
    }

    /// Predictor latitudes.
    pub fn lat_pre(&self) -> &[f64] {
        &self.lat_pre
    }

    /// Largest absolute elementwise difference to `other`, or `None` if the
    /// shapes differ. NaN differences count as infinite.
    pub fn max_abs_diff(&self, other: &PairwiseResultTensor) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        let diff = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let d = (a - b).abs();
                if d.is_nan() { f64::INFINITY } else { d }
            })
            .fold(0.0, f64::max);
        Some(diff)
    }
}
