//! Bench command: run the chunked computation on synthetic fields.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use cpa_broadcast::PairwiseResultTensor;
use cpa_chunked::{ChunkSpec, ExecutorConfig, Scheduler, compute_chunked};
use cpa_grid::LabeledSeries3D;
use cpa_stats::Statistic;

use crate::cli::BenchArgs;
use crate::convert;
use crate::plan_cmd::load_config;
use crate::synthetic::{predictor_field, response_field};

/// Default seed when neither the CLI nor the config sets one.
const DEFAULT_SEED: u64 = 42;

/// JSON report of one benchmark run.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub scheduler: String,
    pub statistic: String,
    pub seed: u64,
    pub result_name: String,
    pub result_shape: [usize; 4],
    pub n_pairs: usize,
    pub elapsed_secs: f64,
    pub pairs_per_sec: f64,
    pub mean_score: f64,
    /// Max |chunked - reference| when `--check` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_diff: Option<f64>,
}

/// Run identity shared by every report field that does not come from the result.
pub struct RunInfo<'a> {
    pub scheduler: Scheduler,
    pub statistic: &'a str,
    pub seed: u64,
}

/// Builds the report for one finished run.
pub fn report(
    run: &RunInfo<'_>,
    result: &PairwiseResultTensor,
    elapsed_secs: f64,
    max_abs_diff: Option<f64>,
) -> BenchReport {
    let (a, b, c, d) = result.shape();
    let n_pairs = result.values().len();
    BenchReport {
        scheduler: run.scheduler.to_string(),
        statistic: run.statistic.to_string(),
        seed: run.seed,
        result_name: result.name().to_string(),
        result_shape: [a, b, c, d],
        n_pairs,
        elapsed_secs,
        pairs_per_sec: if elapsed_secs > 0.0 {
            n_pairs as f64 / elapsed_secs
        } else {
            0.0
        },
        mean_score: result.values().mean().unwrap_or(f64::NAN),
        max_abs_diff,
    }
}

/// Recomputes the result as one chunk per grid on the calling thread and
/// fails unless it is identical to `result`.
fn check_against_reference(
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    statistic: &dyn Statistic,
    result: &PairwiseResultTensor,
) -> Result<f64> {
    let reference_cfg = ExecutorConfig::new(
        ChunkSpec::new(response.n_lat(), response.n_lon()),
        ChunkSpec::new(predictor.n_lat(), predictor.n_lon()),
    )
    .with_scheduler(Scheduler::Synchronous);
    let reference = compute_chunked(response, predictor, statistic, &reference_cfg)
        .context("reference computation failed")?;
    compare(result, &reference)
}

/// Max abs difference of two results; any non-zero difference is an error.
fn compare(result: &PairwiseResultTensor, reference: &PairwiseResultTensor) -> Result<f64> {
    let diff = result
        .max_abs_diff(reference)
        .context("reference result has a different shape")?;
    if diff != 0.0 {
        bail!("chunked result differs from reference by {diff}");
    }
    Ok(diff)
}

/// Run the bench command.
pub fn run(args: BenchArgs) -> Result<()> {
    let _cmd = info_span!("bench").entered();
    let cfg = load_config(&args.config)?;
    let exec_cfg = convert::build_executor_config(&cfg, args.scheduler.as_deref())?;
    let statistic = convert::parse_statistic(&cfg.executor.statistic)?;
    let seed = args.seed.or(cfg.seed).unwrap_or(DEFAULT_SEED);

    let response = response_field(&cfg.response, seed).context("failed to build response field")?;
    let predictor = predictor_field(&cfg.predictor, seed.wrapping_add(1))
        .context("failed to build predictor field")?;
    info!(
        response = ?response.shape(),
        predictor = ?predictor.shape(),
        seed,
        "synthetic fields ready"
    );

    let start = Instant::now();
    let result = compute_chunked(&response, &predictor, statistic.as_ref(), &exec_cfg)
        .context("chunked computation failed")?;
    let elapsed = start.elapsed().as_secs_f64();
    info!(elapsed_secs = elapsed, "chunked computation done");

    let max_abs_diff = if args.check {
        let diff = check_against_reference(&response, &predictor, statistic.as_ref(), &result)?;
        info!("chunked result matches unchunked reference");
        Some(diff)
    } else {
        None
    };

    let run = RunInfo {
        scheduler: exec_cfg.scheduler(),
        statistic: &cfg.executor.statistic,
        seed,
    };
    let json = serde_json::to_string_pretty(&report(&run, &result, elapsed, max_abs_diff))?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
