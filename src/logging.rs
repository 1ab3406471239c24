use tracing_subscriber::EnvFilter;

/// Workspace crates whose events are shown.
const CRATE_TARGETS: &[&str] = &[
    "cpa",
    "cpa_broadcast",
    "cpa_chunked",
    "cpa_grid",
    "cpa_stats",
];

/// Maps the `-v` count to a level: none -> warn, -v -> info, -vv -> debug,
/// -vvv and above -> trace.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives enabling `level` for every workspace crate only.
fn directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing on stderr based on CLI verbosity.
///
/// `RUST_LOG` overrides the CLI flag if set. Thread names are printed so
/// per-task events can be traced to their `cpa-worker-N` thread.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}
