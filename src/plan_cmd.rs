//! Plan command: validate a configuration and report the chunk layout.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use cpa_chunked::{ChunkPlan, ExecutorConfig, plan};

use crate::cli::PlanArgs;
use crate::config::{CpaToml, GridToml};
use crate::convert;

/// JSON summary of a chunk plan.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub scheduler: String,
    pub response_chunks: usize,
    pub predictor_chunks: usize,
    pub n_tasks: usize,
    pub n_pairs: usize,
    pub largest_task_pairs: usize,
    pub result_shape: [usize; 4],
}

/// Reads and parses a TOML configuration file.
pub fn load_config(path: &std::path::Path) -> Result<CpaToml> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

fn shape(grid: &GridToml) -> (usize, usize, usize) {
    (grid.n_time, grid.n_lat, grid.n_lon)
}

/// Product of cell counts, failing instead of overflowing.
fn checked_product(factors: &[usize]) -> Result<usize> {
    factors
        .iter()
        .try_fold(1_usize, |acc, &f| acc.checked_mul(f))
        .with_context(|| format!("pair count {factors:?} overflows usize"))
}

/// Builds the report for a validated plan.
pub fn report(cfg: &CpaToml, scheduler: String, plan: &ChunkPlan) -> Result<PlanReport> {
    let largest = |chunks: &[cpa_chunked::Chunk]| chunks.iter().map(|c| c.n_cells()).max();
    let largest_task_pairs = checked_product(&[
        largest(plan.response()).unwrap_or(0),
        largest(plan.predictor()).unwrap_or(0),
    ])?;
    let (r, p) = (&cfg.response, &cfg.predictor);

    Ok(PlanReport {
        scheduler,
        response_chunks: plan.response().len(),
        predictor_chunks: plan.predictor().len(),
        n_tasks: plan.n_tasks(),
        n_pairs: checked_product(&[r.n_lat, r.n_lon, p.n_lat, p.n_lon])?,
        largest_task_pairs,
        result_shape: [r.n_lon, r.n_lat, p.n_lon, p.n_lat],
    })
}

/// Partitions both configured grids, rejecting bad shapes or chunk sizes.
fn validated_plan(cfg: &CpaToml, exec_cfg: &ExecutorConfig) -> Result<ChunkPlan> {
    plan(shape(&cfg.response), shape(&cfg.predictor), exec_cfg).context("invalid plan")
}

/// Run the plan command.
pub fn run(args: PlanArgs) -> Result<()> {
    let _cmd = info_span!("plan").entered();
    let cfg = load_config(&args.config)?;
    let exec_cfg = convert::build_executor_config(&cfg, None)?;

    let plan = validated_plan(&cfg, &exec_cfg)?;
    info!(n_tasks = plan.n_tasks(), "plan validated");

    let report = report(&cfg, exec_cfg.scheduler().to_string(), &plan)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
