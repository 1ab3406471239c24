//! Reproducible synthetic fields for benchmarking.

use std::f64::consts::TAU;

use anyhow::Result;
use chrono::NaiveDate;
use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cpa_grid::{LabeledSeries3D, daily_time_axis};

use crate::config::GridToml;

/// First day of every synthetic time axis.
const EPOCH: (i32, u32, u32) = (2001, 1, 1);

fn axis(start: f64, resolution: f64, n: usize) -> Vec<f64> {
    (0..n).map(|k| start + resolution * k as f64).collect()
}

fn time_axis(n_time: usize) -> Vec<chrono::NaiveDateTime> {
    let (y, m, d) = EPOCH;
    let start = NaiveDate::from_ymd_opt(y, m, d).expect("epoch is a valid date");
    daily_time_axis(start, n_time)
}

/// Seasonal predictor: annual cycle with a per-cell phase plus noise.
pub fn predictor_field(grid: &GridToml, seed: u64) -> Result<LabeledSeries3D> {
    let mut rng = StdRng::seed_from_u64(seed);
    let phases: Vec<f64> = (0..grid.n_lat * grid.n_lon)
        .map(|_| rng.random_range(0.0..TAU))
        .collect();
    let values = Array3::from_shape_fn((grid.n_time, grid.n_lat, grid.n_lon), |(t, j, i)| {
        let phase = phases[j * grid.n_lon + i];
        (TAU * t as f64 / 365.25 + phase).sin() + rng.random_range(-0.5..0.5)
    });

    Ok(LabeledSeries3D::new(
        values,
        time_axis(grid.n_time),
        axis(grid.lat_start, grid.resolution, grid.n_lat),
        axis(grid.lon_start, grid.resolution, grid.n_lon),
    )?)
}

/// Rainfall-like response: non-negative, zero-inflated, rounded to 0.1 mm.
pub fn response_field(grid: &GridToml, seed: u64) -> Result<LabeledSeries3D> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = Array3::from_shape_fn((grid.n_time, grid.n_lat, grid.n_lon), |(t, j, _)| {
        let season = (TAU * t as f64 / 365.25 + j as f64 * 0.1).sin();
        let amount = 4.0 * season + rng.random_range(-2.0..6.0);
        (amount.max(0.0) * 10.0).round() / 10.0
    });

    Ok(LabeledSeries3D::new(
        values,
        time_axis(grid.n_time),
        axis(grid.lat_start, grid.resolution, grid.n_lat),
        axis(grid.lon_start, grid.resolution, grid.n_lon),
    )?)
}
