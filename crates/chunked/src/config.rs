//! Configuration for chunked computations.

use cpa_broadcast::DEFAULT_RESULT_NAME;

use crate::chunk::ChunkSpec;
use crate::error::CpaError;
use crate::scheduler::Scheduler;

/// Configuration for [`compute_chunked`](crate::compute_chunked).
///
/// # Example
///
/// ```
/// use cpa_chunked::{ChunkSpec, ExecutorConfig, Scheduler};
///
/// let config = ExecutorConfig::new(ChunkSpec::new(4, 4), ChunkSpec::new(8, 8))
///     .with_scheduler(Scheduler::Threads)
///     .with_workers(4);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// Chunk sizes for the response grid.
    response_chunks: ChunkSpec,
    /// Chunk sizes for the predictor grid.
    predictor_chunks: ChunkSpec,
    /// Execution mode.
    scheduler: Scheduler,
    /// Worker count; `None` means one per logical CPU.
    workers: Option<usize>,
    /// Variable name given to the result.
    result_name: String,
}

impl ExecutorConfig {
    /// Creates a configuration with the given chunk specs.
    ///
    /// Defaults: `scheduler = Processes`, `workers = None`,
    /// `result_name = "rainfall_cpa"`.
    pub fn new(response_chunks: ChunkSpec, predictor_chunks: ChunkSpec) -> Self {
        Self {
            response_chunks,
            predictor_chunks,
            scheduler: Scheduler::default(),
            workers: None,
            result_name: DEFAULT_RESULT_NAME.to_string(),
        }
    }

    /// Sets the execution mode.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Sets an explicit worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the variable name of the result.
    pub fn with_result_name(mut self, name: impl Into<String>) -> Self {
        self.result_name = name.into();
        self
    }

    /// Returns the response chunk spec.
    pub fn response_chunks(&self) -> ChunkSpec {
        self.response_chunks
    }

    /// Returns the predictor chunk spec.
    pub fn predictor_chunks(&self) -> ChunkSpec {
        self.predictor_chunks
    }

    /// Returns the execution mode.
    pub fn scheduler(&self) -> Scheduler {
        self.scheduler
    }

    /// Returns the explicit worker count, if any.
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Returns the result variable name.
    pub fn result_name(&self) -> &str {
        &self.result_name
    }

    /// Validates settings that do not depend on the grids.
    ///
    /// Chunk sizes are checked against the grids by
    /// [`plan`](crate::plan).
    pub fn validate(&self) -> Result<(), CpaError> {
        if self.workers == Some(0) {
            return Err(CpaError::InvalidWorkers { workers: 0 });
        }
        Ok(())
    }
}
