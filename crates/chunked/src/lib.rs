//! # cpa-chunked
//!
//! Chunked, parallel computation of pairwise statistics between a response
//! grid and a predictor grid.
//!
//! ## Pipeline
//!
//! ```text
//! compute_chunked()
//!   ├─ plan()                 validate time length + chunk specs, partition both grids
//!   ├─ build_pool()           call-scoped rayon pool (unless synchronous)
//!   ├─ run tasks              one broadcast_blocks() per (response chunk, predictor chunk)
//!   └─ assemble()             write partials into disjoint ranges of one Array4
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use cpa_chunked::{ChunkSpec, ExecutorConfig, Scheduler, compute_chunked};
//! use cpa_grid::{LabeledSeries3D, daily_time_axis};
//! use cpa_stats::Cpa;
//! use ndarray::Array3;
//!
//! let time = daily_time_axis(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 6);
//! let response = LabeledSeries3D::new(
//!     Array3::from_shape_fn((6, 2, 2), |(t, j, i)| ((t * 7 + j * 3 + i) % 5) as f64),
//!     time.clone(),
//!     vec![10.0, 10.5],
//!     vec![75.0, 75.5],
//! )?;
//! let predictor = LabeledSeries3D::new(
//!     Array3::from_shape_fn((6, 3, 1), |(t, j, _)| (t + j) as f64),
//!     time,
//!     vec![0.0, 5.0, 10.0],
//!     vec![60.0],
//! )?;
//!
//! let config = ExecutorConfig::new(ChunkSpec::new(1, 2), ChunkSpec::new(2, 1))
//!     .with_scheduler(Scheduler::Threads)
//!     .with_workers(2);
//! let result = compute_chunked(&response, &predictor, &Cpa, &config)?;
//! assert_eq!(result.shape(), (2, 2, 1, 3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunk;
mod config;
mod error;
mod executor;
mod scheduler;

pub use chunk::{Chunk, ChunkPlan, ChunkSpec, GridRole, partition, plan};
pub use config::ExecutorConfig;
pub use error::{CpaError, SchedulerError};
pub use executor::{compute_chunked, compute_chunked_in};
pub use scheduler::Scheduler;
