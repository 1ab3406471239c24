//! Dispatch of chunk-pair tasks and assembly of the dense result.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use cpa_broadcast::{BroadcastError, PairwiseResultTensor, SeriesBlock, broadcast_blocks};
use cpa_grid::LabeledSeries3D;
use cpa_stats::Statistic;
use ndarray::{Array4, s};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::chunk::{ChunkPlan, plan};
use crate::config::ExecutorConfig;
use crate::error::{CpaError, SchedulerError};
use crate::scheduler::{Scheduler, build_pool};

/// Where workers get their series blocks from.
enum BlockSource<'a> {
    /// Blocks copied out before dispatch; workers never touch the inputs.
    Owned {
        response: Vec<SeriesBlock>,
        predictor: Vec<SeriesBlock>,
    },
    /// Workers slice the caller's grids themselves.
    Shared {
        response: &'a LabeledSeries3D,
        predictor: &'a LabeledSeries3D,
    },
}

impl<'a> BlockSource<'a> {
    fn new(
        scheduler: Scheduler,
        plan: &ChunkPlan,
        response: &'a LabeledSeries3D,
        predictor: &'a LabeledSeries3D,
    ) -> Result<Self, BroadcastError> {
        match scheduler {
            Scheduler::Threads => Ok(BlockSource::Shared {
                response,
                predictor,
            }),
            Scheduler::Processes | Scheduler::Synchronous => {
                let copy = |grid: &LabeledSeries3D, chunks: &[crate::Chunk]| {
                    chunks
                        .iter()
                        .map(|c| SeriesBlock::extract(grid, c.lat.clone(), c.lon.clone()))
                        .collect::<Result<Vec<_>, _>>()
                };
                Ok(BlockSource::Owned {
                    response: copy(response, plan.response())?,
                    predictor: copy(predictor, plan.predictor())?,
                })
            }
        }
    }

    fn broadcast<S>(
        &self,
        plan: &ChunkPlan,
        task: (usize, usize),
        statistic: &S,
    ) -> Result<Array4<f64>, BroadcastError>
    where
        S: Statistic + ?Sized,
    {
        let (r, p) = task;
        match self {
            BlockSource::Owned {
                response,
                predictor,
            } => broadcast_blocks(&response[r], &predictor[p], statistic),
            BlockSource::Shared {
                response,
                predictor,
            } => {
                let rc = &plan.response()[r];
                let pc = &plan.predictor()[p];
                let rb = SeriesBlock::extract(response, rc.lat.clone(), rc.lon.clone())?;
                let pb = SeriesBlock::extract(predictor, pc.lat.clone(), pc.lon.clone())?;
                broadcast_blocks(&rb, &pb, statistic)
            }
        }
    }
}

/// Output of one task: its chunk ordinals and its partial result.
struct Partial {
    task: (usize, usize),
    values: Array4<f64>,
}

/// Computes the pairwise result tensor by splitting both grids into chunks
/// and running every chunk pair as an independent task.
///
/// The worker pool (if the scheduler uses one) is created for this call and
/// dropped before returning. The output is identical for every valid
/// chunking and every scheduler.
///
/// Time labels are not required to match; if they differ, a warning is
/// logged and the inputs are treated as aligned. Time lengths must match.
///
/// # Errors
///
/// - [`CpaError::DimensionMismatch`] if the time lengths differ.
/// - [`CpaError::ChunkSizeInvalid`] if a chunk spec does not fit its grid.
/// - [`CpaError::InvalidWorkers`] if zero workers are requested.
/// - [`CpaError::Scheduler`] if any task fails or panics. No partial result
///   is returned.
///
/// All input errors are reported before any worker is created.
#[tracing::instrument(skip_all, fields(scheduler = %config.scheduler()))]
pub fn compute_chunked<S>(
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    statistic: &S,
    config: &ExecutorConfig,
) -> Result<PairwiseResultTensor, CpaError>
where
    S: Statistic + ?Sized,
{
    let plan = prepare(response, predictor, config)?;
    if config.scheduler().is_parallel() {
        let pool = build_pool(config.workers())?;
        execute(&plan, response, predictor, statistic, config, Some(&pool))
    } else {
        execute(&plan, response, predictor, statistic, config, None)
    }
}

/// Same as [`compute_chunked`], running on a caller-owned worker pool.
///
/// The pool is reused as is; [`ExecutorConfig::workers`] is ignored. With
/// [`Scheduler::Synchronous`] the pool is not used.
///
/// # Errors
///
/// See [`compute_chunked`].
#[tracing::instrument(skip_all, fields(scheduler = %config.scheduler(), workers = pool.current_num_threads()))]
pub fn compute_chunked_in<S>(
    pool: &rayon::ThreadPool,
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    statistic: &S,
    config: &ExecutorConfig,
) -> Result<PairwiseResultTensor, CpaError>
where
    S: Statistic + ?Sized,
{
    let plan = prepare(response, predictor, config)?;
    let pool = config.scheduler().is_parallel().then_some(pool);
    execute(&plan, response, predictor, statistic, config, pool)
}

/// Input validation shared by both entry points.
fn prepare(
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    config: &ExecutorConfig,
) -> Result<ChunkPlan, CpaError> {
    let plan = plan(response.shape(), predictor.shape(), config)?;
    config.validate()?;

    if !response.time_matches(predictor) {
        warn!(
            n_time = response.n_time(),
            "response and predictor time labels differ; treating them as aligned"
        );
    }

    info!(
        response = ?response.shape(),
        predictor = ?predictor.shape(),
        response_chunks = plan.response().len(),
        predictor_chunks = plan.predictor().len(),
        n_tasks = plan.n_tasks(),
        "chunk plan ready"
    );
    Ok(plan)
}

fn execute<S>(
    plan: &ChunkPlan,
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    statistic: &S,
    config: &ExecutorConfig,
    pool: Option<&rayon::ThreadPool>,
) -> Result<PairwiseResultTensor, CpaError>
where
    S: Statistic + ?Sized,
{
    let source = BlockSource::new(config.scheduler(), plan, response, predictor)?;
    let tasks: Vec<(usize, usize)> = plan.tasks().collect();

    let partials: Vec<Partial> = match pool {
        Some(pool) => pool.install(|| {
            tasks
                .par_iter()
                .map(|&task| run_task(&source, plan, task, statistic))
                .collect::<Result<Vec<_>, _>>()
        })?,
        None => tasks
            .iter()
            .map(|&task| run_task(&source, plan, task, statistic))
            .collect::<Result<Vec<_>, _>>()?,
    };
    drop(source);

    let shape = (
        response.n_lon(),
        response.n_lat(),
        predictor.n_lon(),
        predictor.n_lat(),
    );
    let values = assemble(plan, partials, shape)?;
    info!(n_values = values.len(), "pairwise result assembled");

    Ok(PairwiseResultTensor::new(
        values,
        response.lon().to_vec(),
        response.lat().to_vec(),
        predictor.lon().to_vec(),
        predictor.lat().to_vec(),
    )?
    .with_name(config.result_name()))
}

/// Runs one chunk-pair task, turning errors and panics into [`SchedulerError`].
fn run_task<S>(
    source: &BlockSource<'_>,
    plan: &ChunkPlan,
    task: (usize, usize),
    statistic: &S,
) -> Result<Partial, SchedulerError>
where
    S: Statistic + ?Sized,
{
    let (response_chunk, predictor_chunk) = task;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        source.broadcast(plan, task, statistic)
    }));

    match outcome {
        Ok(Ok(values)) => {
            debug!(response_chunk, predictor_chunk, n_pairs = values.len(), "task done");
            Ok(Partial { task, values })
        }
        Ok(Err(source)) => Err(SchedulerError::Task {
            response_chunk,
            predictor_chunk,
            source,
        }),
        Err(payload) => Err(SchedulerError::Panicked {
            response_chunk,
            predictor_chunk,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Writes every partial result into its index range of a fresh output array.
///
/// Ranges are disjoint by construction of the partition, so placement does
/// not depend on the order of `partials`.
fn assemble(
    plan: &ChunkPlan,
    partials: Vec<Partial>,
    shape: (usize, usize, usize, usize),
) -> Result<Array4<f64>, SchedulerError> {
    let mut out = Array4::<f64>::from_elem(shape, f64::NAN);
    let expected = out.len();
    let mut written = 0;

    for partial in partials {
        let (r, p) = partial.task;
        let rc = &plan.response()[r];
        let pc = &plan.predictor()[p];
        let mut target = out.slice_mut(s![
            rc.lon.clone(),
            rc.lat.clone(),
            pc.lon.clone(),
            pc.lat.clone()
        ]);
        if target.dim() != partial.values.dim() {
            return Err(SchedulerError::Assembly { expected, written });
        }
        target.assign(&partial.values);
        written += partial.values.len();
    }

    if written != expected {
        return Err(SchedulerError::Assembly { expected, written });
    }
    Ok(out)
}
