//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use cpa_chunked::{ChunkSpec, ExecutorConfig, Scheduler};
use cpa_stats::{Cpa, MeanDifference, PearsonCorrelation, Statistic};

use crate::config::CpaToml;

/// Parses a statistic name into one of the built-in statistics.
pub fn parse_statistic(s: &str) -> Result<Box<dyn Statistic>> {
    match s.to_lowercase().as_str() {
        "cpa" => Ok(Box::new(Cpa)),
        "pearson" => Ok(Box::new(PearsonCorrelation)),
        "mean_difference" | "mean-difference" => Ok(Box::new(MeanDifference)),
        other => bail!("unknown statistic: {other:?}"),
    }
}

/// Builds an [`ExecutorConfig`] from the TOML configuration.
///
/// `scheduler_override` replaces `[executor].scheduler` when given.
pub fn build_executor_config(
    cfg: &CpaToml,
    scheduler_override: Option<&str>,
) -> Result<ExecutorConfig> {
    let name = scheduler_override.unwrap_or(&cfg.executor.scheduler);
    let scheduler: Scheduler = name
        .parse()
        .with_context(|| format!("invalid scheduler {name:?}"))?;

    let [r_lat, r_lon] = cfg.response.chunks;
    let [p_lat, p_lon] = cfg.predictor.chunks;
    let mut config = ExecutorConfig::new(ChunkSpec::new(r_lat, r_lon), ChunkSpec::new(p_lat, p_lon))
        .with_scheduler(scheduler)
        .with_result_name(&cfg.executor.result_name);
    if let Some(n) = cfg.executor.workers {
        config = config.with_workers(n);
    }
    config.validate()?;
    Ok(config)
}
