//! Execution modes and call-scoped worker pools.

use std::fmt;
use std::str::FromStr;

use crate::error::{CpaError, SchedulerError};

/// How chunk tasks are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheduler {
    /// Worker pool with isolated inputs: every block is copied out of the
    /// caller's grids before dispatch and workers only read their own copies.
    ///
    /// No operating-system processes are spawned. Workers are threads of a
    /// rayon pool inside the calling process; only their inputs are isolated.
    #[default]
    Processes,
    /// Worker pool with shared inputs: workers read the caller's grids and
    /// extract their blocks themselves.
    Threads,
    /// All tasks run in order on the calling thread.
    Synchronous,
}

impl Scheduler {
    /// Returns `true` if this mode uses a worker pool.
    pub fn is_parallel(&self) -> bool {
        !matches!(self, Scheduler::Synchronous)
    }
}

impl FromStr for Scheduler {
    type Err = CpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processes" | "process" | "multiprocessing" => Ok(Scheduler::Processes),
            "threads" | "thread" | "threading" => Ok(Scheduler::Threads),
            "synchronous" | "sync" | "single-threaded" => Ok(Scheduler::Synchronous),
            _ => Err(CpaError::InvalidScheduler {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheduler::Processes => "processes",
            Scheduler::Threads => "threads",
            Scheduler::Synchronous => "synchronous",
        };
        f.write_str(name)
    }
}

/// Builds a worker pool that lives only as long as the returned value.
///
/// `workers = None` lets rayon pick one worker per logical CPU.
pub(crate) fn build_pool(workers: Option<usize>) -> Result<rayon::ThreadPool, SchedulerError> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("cpa-worker-{i}"));
    if let Some(n) = workers {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| SchedulerError::ThreadPool {
        reason: e.to_string(),
    })
}
