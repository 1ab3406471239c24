//! Coefficient of Predictive Ability (Gneiting & Walz, 2022).
//!
//! ```text
//! CPA = ( cov(class(y), rank(x)) / cov(class(y), rank(y)) + 1 ) / 2
//! ```
//!
//! where `class(y)` are dense ranks of the response and `rank(.)` are
//! midranks. CPA is 1 for a perfectly order-preserving predictor, 0 for a
//! perfectly order-reversing one and 0.5 for an uninformative one. For a
//! binary response it reduces to the area under the ROC curve.

use crate::error::StatisticError;
use crate::rank::{dense_ranks, midranks};
use crate::statistic::{Statistic, check_pair};
use crate::covariance;

/// Coefficient of Predictive Ability of `predictor` for `response`.
///
/// # Errors
///
/// Returns [`StatisticError::LengthMismatch`], [`StatisticError::EmptySeries`]
/// or [`StatisticError::NonFiniteInput`] on malformed input, and
/// [`StatisticError::ConstantResponse`] when the response has fewer than two
/// distinct values (the score is undefined).
pub fn cpa(response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError> {
    check_pair(response, predictor)?;

    let classes = dense_ranks(response);
    let response_ranks = midranks(response);
    let predictor_ranks = midranks(predictor);

    let denom = covariance(&classes, &response_ranks);
    if denom <= 0.0 {
        return Err(StatisticError::ConstantResponse);
    }

    Ok((covariance(&classes, &predictor_ranks) / denom + 1.0) / 2.0)
}

/// [`Statistic`] wrapper around [`cpa`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpa;

impl Statistic for Cpa {
    fn evaluate(&self, response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError> {
        cpa(response, predictor)
    }
}
