//! The [`Statistic`] seam and simple built-in statistics.

use crate::error::StatisticError;
use crate::{mean, pearson_correlation};

/// A scalar score computed from a response series and a predictor series.
///
/// Implementations must be pure: identical inputs give identical outputs and
/// there are no side effects. They are shared across worker threads, hence
/// the `Sync` bound.
///
/// Closures of the form `Fn(&[f64], &[f64]) -> Result<f64, StatisticError>`
/// implement this trait.
///
/// ```
/// use cpa_stats::{Statistic, StatisticError};
///
/// let max_gap = |r: &[f64], p: &[f64]| -> Result<f64, StatisticError> {
///     Ok(r.iter().zip(p).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max))
/// };
/// assert_eq!(max_gap.evaluate(&[1.0, 5.0], &[2.0, 2.0]).unwrap(), 3.0);
/// ```
pub trait Statistic: Sync {
    /// Scores `predictor` against `response`. Both series have equal length.
    fn evaluate(&self, response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError>;
}

impl<F> Statistic for F
where
    F: Fn(&[f64], &[f64]) -> Result<f64, StatisticError> + Sync,
{
    fn evaluate(&self, response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError> {
        self(response, predictor)
    }
}

/// Validates a series pair: equal length, non-empty, all finite.
pub(crate) fn check_pair(response: &[f64], predictor: &[f64]) -> Result<(), StatisticError> {
    if response.len() != predictor.len() {
        return Err(StatisticError::LengthMismatch {
            response: response.len(),
            predictor: predictor.len(),
        });
    }
    if response.is_empty() {
        return Err(StatisticError::EmptySeries);
    }
    if response.iter().any(|v| !v.is_finite()) {
        return Err(StatisticError::NonFiniteInput { input: "response" });
    }
    if predictor.iter().any(|v| !v.is_finite()) {
        return Err(StatisticError::NonFiniteInput { input: "predictor" });
    }
    Ok(())
}

/// Mean of the elementwise difference `response - predictor`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanDifference;

impl Statistic for MeanDifference {
    fn evaluate(&self, response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError> {
        check_pair(response, predictor)?;
        let diff: Vec<f64> = response
            .iter()
            .zip(predictor)
            .map(|(r, p)| r - p)
            .collect();
        Ok(mean(&diff))
    }
}

/// Pearson correlation over finite pairs, see [`pearson_correlation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonCorrelation;

impl Statistic for PearsonCorrelation {
    fn evaluate(&self, response: &[f64], predictor: &[f64]) -> Result<f64, StatisticError> {
        if response.len() != predictor.len() {
            return Err(StatisticError::LengthMismatch {
                response: response.len(),
                predictor: predictor.len(),
            });
        }
        pearson_correlation(response, predictor).ok_or(StatisticError::Undefined {
            statistic: "pearson correlation",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_is_statistic() {
        let first = |r: &[f64], _: &[f64]| -> Result<f64, StatisticError> { Ok(r[0]) };
        assert_eq!(first.evaluate(&[4.0, 1.0], &[0.0, 0.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_closure_error_passes_through() {
        let failing = |_: &[f64], _: &[f64]| -> Result<f64, StatisticError> {
            Err(StatisticError::Failed {
                reason: "no skill".into(),
            })
        };
        assert_eq!(
            failing.evaluate(&[1.0], &[1.0]),
            Err(StatisticError::Failed {
                reason: "no skill".into()
            })
        );
    }

    #[test]
    fn test_mean_difference() {
        let r = [1.0, 2.0, 3.0, 4.0, 5.0];
        let p = [0.5, 0.5, 0.5, 0.5, 0.5];
        assert_relative_eq!(MeanDifference.evaluate(&r, &p).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_difference_length_mismatch() {
        assert_eq!(
            MeanDifference.evaluate(&[1.0, 2.0], &[1.0]),
            Err(StatisticError::LengthMismatch {
                response: 2,
                predictor: 1
            })
        );
    }

    #[test]
    fn test_check_pair_rejects_nan_predictor() {
        assert_eq!(
            check_pair(&[1.0, 2.0], &[f64::NAN, 1.0]),
            Err(StatisticError::NonFiniteInput { input: "predictor" })
        );
    }

    #[test]
    fn test_check_pair_rejects_empty() {
        assert_eq!(check_pair(&[], &[]), Err(StatisticError::EmptySeries));
    }

    #[test]
    fn test_pearson_statistic_undefined_for_constant() {
        let err = PearsonCorrelation
            .evaluate(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, StatisticError::Undefined { .. }));
    }
}
