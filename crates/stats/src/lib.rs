//! Time-series statistics for pairwise CPA.
//!
//! The broadcaster and the chunked executor only see the [`Statistic`]
//! trait. This crate provides that seam, the reference [`cpa`] score and a
//! few plain helpers used to build and test statistics.
//!
//! | Statistic | Score |
//! |-----------|-------|
//! | [`Cpa`] | Coefficient of Predictive Ability, rank based |
//! | [`PearsonCorrelation`] | Linear correlation over finite pairs |
//! | [`MeanDifference`] | `mean(response - predictor)` |

mod cpa;
mod error;
mod rank;
mod statistic;

pub use cpa::{Cpa, cpa};
pub use error::StatisticError;
pub use rank::{dense_ranks, midranks};
pub use statistic::{MeanDifference, PearsonCorrelation, Statistic};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    covariance(data, data)
}

/// Sample covariance with N-1 denominator (matching `numpy.cov`).
///
/// Uses the common prefix if lengths differ. Returns 0.0 if fewer than 2
/// pairs.
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    sum / (n as f64 - 1.0)
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}
