//! Error types for the cpa-chunked crate.

use cpa_broadcast::BroadcastError;

use crate::chunk::GridRole;

/// Error type for chunked pairwise computations.
///
/// Input problems ([`CpaError::DimensionMismatch`],
/// [`CpaError::ChunkSizeInvalid`]) are detected before any worker is
/// created. Failures inside workers surface as [`CpaError::Scheduler`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CpaError {
    /// Returned when the response and predictor time axes differ in length.
    #[error("dimension '{axis}' mismatch: response {response}, predictor {predictor}")]
    DimensionMismatch {
        /// Name of the axis.
        axis: &'static str,
        /// Length in the response grid.
        response: usize,
        /// Length in the predictor grid.
        predictor: usize,
    },

    /// Returned when a chunk size is zero or larger than its grid axis.
    #[error("{grid} chunk size for '{axis}' must be in 1..={len}, got {size}")]
    ChunkSizeInvalid {
        /// Which grid the chunk spec applies to.
        grid: GridRole,
        /// Axis name.
        axis: &'static str,
        /// Requested chunk size.
        size: usize,
        /// Axis length of the grid.
        len: usize,
    },

    /// Returned when a grid has no cells along `lat` or `lon`.
    #[error("{grid} grid has no cells along '{axis}'")]
    EmptyGrid {
        /// Which grid is empty.
        grid: GridRole,
        /// Axis of length zero.
        axis: &'static str,
    },

    /// Returned when a scheduler name is not recognised.
    #[error("unknown scheduler '{name}' (expected processes, threads or synchronous)")]
    InvalidScheduler {
        /// The name that was supplied.
        name: String,
    },

    /// Returned when an explicit worker count of zero is requested.
    #[error("worker count must be >= 1, got {workers}")]
    InvalidWorkers {
        /// The invalid worker count.
        workers: usize,
    },

    /// A worker task or the result assembly failed.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Building the labelled result failed.
    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

/// Failures raised while executing or assembling chunk tasks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    /// A task's broadcast returned an error.
    #[error(
        "task (response chunk {response_chunk}, predictor chunk {predictor_chunk}) failed: {source}"
    )]
    Task {
        /// Ordinal of the response chunk.
        response_chunk: usize,
        /// Ordinal of the predictor chunk.
        predictor_chunk: usize,
        /// The worker's own error.
        source: BroadcastError,
    },

    /// A task panicked.
    #[error(
        "task (response chunk {response_chunk}, predictor chunk {predictor_chunk}) panicked: {message}"
    )]
    Panicked {
        /// Ordinal of the response chunk.
        response_chunk: usize,
        /// Ordinal of the predictor chunk.
        predictor_chunk: usize,
        /// Panic payload, if it was a string.
        message: String,
    },

    /// Partial results did not cover the output exactly once.
    #[error("assembly wrote {written} of {expected} result cells")]
    Assembly {
        /// Number of cells in the output.
        expected: usize,
        /// Number of cells written by partial results.
        written: usize,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {reason}")]
    ThreadPool {
        /// Description of the pool failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpa_grid::SpatialIndexPair;
    use cpa_stats::StatisticError;
    use std::error::Error;

    #[test]
    fn error_chunk_size_invalid() {
        let err = CpaError::ChunkSizeInvalid {
            grid: GridRole::Predictor,
            axis: "lon",
            size: 0,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "predictor chunk size for 'lon' must be in 1..=8, got 0"
        );
    }

    #[test]
    fn error_scheduler_is_transparent() {
        let err = CpaError::from(SchedulerError::Assembly {
            expected: 16,
            written: 12,
        });
        assert_eq!(err.to_string(), "assembly wrote 12 of 16 result cells");
    }

    #[test]
    fn error_task_chain_reaches_statistic() {
        let err = SchedulerError::Task {
            response_chunk: 1,
            predictor_chunk: 3,
            source: BroadcastError::Statistic {
                response: SpatialIndexPair::new(0, 1),
                predictor: SpatialIndexPair::new(2, 2),
                source: StatisticError::ConstantResponse,
            },
        };
        let broadcast = err.source().unwrap();
        let statistic = broadcast.source().unwrap();
        assert_eq!(statistic.to_string(), "response series is constant");
    }

    #[test]
    fn error_empty_grid() {
        let err = CpaError::EmptyGrid {
            grid: GridRole::Response,
            axis: "lat",
        };
        assert_eq!(err.to_string(), "response grid has no cells along 'lat'");
    }

    #[test]
    fn error_invalid_scheduler() {
        let err = CpaError::InvalidScheduler {
            name: "gpu".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown scheduler 'gpu' (expected processes, threads or synchronous)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CpaError>();
        assert_impl::<SchedulerError>();
    }
}
