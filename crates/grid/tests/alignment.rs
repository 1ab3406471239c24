//! Building grids from named axes and aligning their time labels.

use chrono::NaiveDate;
use cpa_grid::{AXES, GridError, LabeledSeries3D, SpatialIndexPair, daily_time_axis};
use ndarray::{Array3, ArrayD, IxDyn};

#[test]
fn canonical_axes() {
    assert_eq!(AXES, ["time", "lat", "lon"]);
}

#[test]
fn lat_lon_time_layout_is_reordered() {
    let (nt, ny, nx) = (4, 3, 2);
    // Stored as (lat, lon, time).
    let data = ArrayD::from_shape_fn(IxDyn(&[ny, nx, nt]), |idx| {
        (idx[2] * 100 + idx[0] * 10 + idx[1]) as f64
    });
    let grid = LabeledSeries3D::from_named(
        data,
        &["lat", "lon", "time"],
        daily_time_axis(NaiveDate::from_ymd_opt(2012, 2, 27).unwrap(), nt),
        vec![1.0, 2.0, 3.0],
        vec![100.0, 101.0],
    )
    .unwrap();

    assert_eq!(grid.shape(), (nt, ny, nx));
    let s = grid.series(SpatialIndexPair::new(2, 1)).unwrap();
    assert_eq!(s.to_vec(), vec![21.0, 121.0, 221.0, 321.0]);
}

#[test]
fn predictor_labels_forced_onto_response() {
    let response_time = daily_time_axis(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 3);
    let predictor_time = daily_time_axis(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 3)
        .into_iter()
        .map(|t| t + chrono::Duration::hours(12))
        .collect();

    let mut response = LabeledSeries3D::new(
        Array3::zeros((3, 1, 1)),
        response_time,
        vec![0.0],
        vec![0.0],
    )
    .unwrap();
    let predictor = LabeledSeries3D::new(
        Array3::ones((3, 2, 2)),
        predictor_time,
        vec![0.0, 1.0],
        vec![0.0, 1.0],
    )
    .unwrap();

    assert!(!response.time_matches(&predictor));
    response.align_time_to(&predictor).unwrap();
    assert_eq!(response.time(), predictor.time());
}

#[test]
fn alignment_needs_equal_length() {
    let t = |n| daily_time_axis(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), n);
    let mut a = LabeledSeries3D::new(Array3::zeros((2, 1, 1)), t(2), vec![0.0], vec![0.0]).unwrap();
    let b = LabeledSeries3D::new(Array3::zeros((5, 1, 1)), t(5), vec![0.0], vec![0.0]).unwrap();
    assert_eq!(
        a.align_time_to(&b),
        Err(GridError::TimeLength {
            expected: 5,
            got: 2
        })
    );
}
