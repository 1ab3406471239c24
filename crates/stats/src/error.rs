//! Error types for the cpa-stats crate.

/// Error type for all fallible statistic evaluations.
///
/// Caller-defined statistics report their own failures through
/// [`StatisticError::Failed`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatisticError {
    /// Returned when the two series differ in length.
    #[error("series length mismatch: response {response}, predictor {predictor}")]
    LengthMismatch {
        /// Length of the response series.
        response: usize,
        /// Length of the predictor series.
        predictor: usize,
    },

    /// Returned when the series are empty.
    #[error("series are empty")]
    EmptySeries,

    /// Returned when an input contains NaN or infinite values.
    #[error("{input} series contains non-finite values")]
    NonFiniteInput {
        /// Which input was non-finite.
        input: &'static str,
    },

    /// Returned when the response series has a single distinct value.
    #[error("response series is constant")]
    ConstantResponse,

    /// Returned when a statistic is mathematically undefined for the input.
    #[error("{statistic} is undefined for this input")]
    Undefined {
        /// Name of the statistic.
        statistic: &'static str,
    },

    /// Failure reported by a caller-supplied statistic.
    #[error("statistic failed: {reason}")]
    Failed {
        /// Description of the failure.
        reason: String,
    },
}
