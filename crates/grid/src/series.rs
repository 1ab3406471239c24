//! Labelled `(time, lat, lon)` series.

use chrono::NaiveDateTime;
use ndarray::{Array3, ArrayD, ArrayView1, ArrayView3, Ix3, IxDyn, s};
use tracing::debug;

use crate::cell::SpatialIndexPair;
use crate::error::GridError;

/// Canonical axis order of a [`LabeledSeries3D`].
pub const AXES: [&str; 3] = ["time", "lat", "lon"];

/// A 3-D field with named `time`, `lat` and `lon` axes and their coordinates.
///
/// Data is always held in canonical `(time, lat, lon)` order. Every axis
/// length matches the length of its coordinate labels, and lat/lon labels are
/// finite.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use cpa_grid::{LabeledSeries3D, SpatialIndexPair, daily_time_axis};
/// use ndarray::Array3;
///
/// let time = daily_time_axis(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 4);
/// let data = Array3::from_shape_fn((4, 2, 3), |(t, j, i)| (t + 10 * j + 100 * i) as f64);
/// let grid = LabeledSeries3D::new(data, time, vec![10.0, 11.0], vec![70.0, 71.0, 72.0]).unwrap();
///
/// assert_eq!(grid.shape(), (4, 2, 3));
/// let series = grid.series(SpatialIndexPair::new(1, 2)).unwrap();
/// assert_eq!(series[3], 213.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSeries3D {
    values: Array3<f64>,
    time: Vec<NaiveDateTime>,
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl LabeledSeries3D {
    /// Builds a grid from data already in `(time, lat, lon)` order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CoordinateLength`] if any label sequence does not
    /// match its axis length, or [`GridError::NonFiniteCoordinate`] if a
    /// lat/lon label is NaN or infinite.
    pub fn new(
        values: Array3<f64>,
        time: Vec<NaiveDateTime>,
        lat: Vec<f64>,
        lon: Vec<f64>,
    ) -> Result<Self, GridError> {
        let (nt, ny, nx) = values.dim();
        for (axis, labels, len) in [
            ("time", time.len(), nt),
            ("lat", lat.len(), ny),
            ("lon", lon.len(), nx),
        ] {
            if labels != len {
                return Err(GridError::CoordinateLength { axis, labels, len });
            }
        }
        check_finite("lat", &lat)?;
        check_finite("lon", &lon)?;

        Ok(Self {
            values,
            time,
            lat,
            lon,
        })
    }

    /// Builds a grid from a dynamic-rank array whose axes are named in `dims`.
    ///
    /// The names must be exactly `time`, `lat` and `lon` in any order; the
    /// data is permuted into canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::AxisCount`] unless the array and `dims` both have
    /// three entries, [`GridError::AxisNames`] if the names are not a
    /// permutation of the canonical axes, plus any error from [`Self::new`].
    pub fn from_named(
        values: ArrayD<f64>,
        dims: &[&str],
        time: Vec<NaiveDateTime>,
        lat: Vec<f64>,
        lon: Vec<f64>,
    ) -> Result<Self, GridError> {
        if values.ndim() != 3 {
            return Err(GridError::AxisCount { got: values.ndim() });
        }
        if dims.len() != 3 {
            return Err(GridError::AxisCount { got: dims.len() });
        }

        let position = |name: &str| dims.iter().position(|d| *d == name);
        let order = match (position("time"), position("lat"), position("lon")) {
            (Some(t), Some(y), Some(x)) => [t, y, x],
            _ => {
                return Err(GridError::AxisNames {
                    names: dims.iter().map(|d| d.to_string()).collect(),
                });
            }
        };

        let permuted = values.permuted_axes(IxDyn(&order));
        let values = permuted
            .as_standard_layout()
            .into_owned()
            .into_dimensionality::<Ix3>()
            .map_err(|_| GridError::AxisCount { got: dims.len() })?;

        Self::new(values, time, lat, lon)
    }

    /// Shape as `(time, lat, lon)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    /// Number of timesteps.
    pub fn n_time(&self) -> usize {
        self.time.len()
    }

    /// Number of latitude rows.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude columns.
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// Time coordinate labels.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Latitude coordinate labels.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude coordinate labels.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Borrowed view of the data in `(time, lat, lon)` order.
    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// Time series at one grid cell, or `None` if the cell is out of bounds.
    pub fn series(&self, cell: SpatialIndexPair) -> Option<ArrayView1<'_, f64>> {
        if cell.lat >= self.n_lat() || cell.lon >= self.n_lon() {
            return None;
        }
        Some(self.values.slice(s![.., cell.lat, cell.lon]))
    }

    /// All grid cells in lat-major order.
    pub fn cells(&self) -> impl Iterator<Item = SpatialIndexPair> + '_ {
        (0..self.n_lat())
            .flat_map(move |lat| (0..self.n_lon()).map(move |lon| SpatialIndexPair::new(lat, lon)))
    }

    /// Returns `true` if both grids carry identical time labels.
    pub fn time_matches(&self, other: &LabeledSeries3D) -> bool {
        self.time == other.time
    }

    /// Overwrites this grid's time labels with those of `reference`.
    ///
    /// Only metadata changes; data values are untouched. Label values are not
    /// compared, only lengths.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TimeLength`] if the time axes differ in length.
    pub fn align_time_to(&mut self, reference: &LabeledSeries3D) -> Result<(), GridError> {
        if reference.n_time() != self.n_time() {
            return Err(GridError::TimeLength {
                expected: reference.n_time(),
                got: self.n_time(),
            });
        }
        if !self.time_matches(reference) {
            debug!(n_time = self.n_time(), "overwriting time labels");
        }
        self.time = reference.time.clone();
        Ok(())
    }
}

fn check_finite(axis: &'static str, labels: &[f64]) -> Result<(), GridError> {
    match labels.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(GridError::NonFiniteCoordinate { axis, index }),
        None => Ok(()),
    }
}
