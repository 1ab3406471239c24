use serde::Deserialize;

/// Top-level CPA configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CpaToml {
    /// RNG seed for synthetic fields.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Response (target) grid.
    pub response: GridToml,

    /// Predictor grid.
    pub predictor: GridToml,

    /// Execution settings.
    #[serde(default)]
    pub executor: ExecutorToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub n_time: usize,
    pub n_lat: usize,
    pub n_lon: usize,
    /// Chunk sizes as `[lat, lon]`.
    pub chunks: [usize; 2],
    #[serde(default)]
    pub lat_start: f64,
    #[serde(default)]
    pub lon_start: f64,
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorToml {
    #[serde(default = "default_scheduler")]
    pub scheduler: String,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default = "default_statistic")]
    pub statistic: String,
    #[serde(default = "default_result_name")]
    pub result_name: String,
}

impl Default for ExecutorToml {
    fn default() -> Self {
        Self {
            scheduler: default_scheduler(),
            workers: None,
            statistic: default_statistic(),
            result_name: default_result_name(),
        }
    }
}

fn default_resolution() -> f64 {
    0.25
}
fn default_scheduler() -> String {
    "processes".to_string()
}
fn default_statistic() -> String {
    "cpa".to_string()
}
fn default_result_name() -> String {
    "rainfall_cpa".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [response]
        n_time = 100
        n_lat = 4
        n_lon = 6
        chunks = [2, 3]

        [predictor]
        n_time = 100
        n_lat = 8
        n_lon = 8
        chunks = [4, 4]
    "#;

    #[test]
    fn test_minimal_uses_defaults() {
        let cfg: CpaToml = toml::from_str(MINIMAL).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.response.chunks, [2, 3]);
        assert_eq!(cfg.predictor.resolution, 0.25);
        assert_eq!(cfg.executor.scheduler, "processes");
        assert_eq!(cfg.executor.statistic, "cpa");
        assert_eq!(cfg.executor.result_name, "rainfall_cpa");
        assert_eq!(cfg.executor.workers, None);
    }

    #[test]
    fn test_full_executor_section() {
        let text = format!(
            "seed = 9\n{MINIMAL}\n[executor]\nscheduler = \"threads\"\nworkers = 4\nstatistic = \"pearson\"\n"
        );
        let cfg: CpaToml = toml::from_str(&text).unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.executor.scheduler, "threads");
        assert_eq!(cfg.executor.workers, Some(4));
        assert_eq!(cfg.executor.statistic, "pearson");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let text = format!("{MINIMAL}\n[executor]\nbackend = \"dask\"\n");
        assert!(toml::from_str::<CpaToml>(&text).is_err());
    }
}
