//! Pairwise broadcast of a time-series statistic over two grids.
//!
//! Given a response grid `R` (`T x Hr x Wr`) and a predictor grid `P`
//! (`T x Hp x Wp`), the broadcast scores every response series against every
//! predictor series:
//!
//! ```text
//! out[i, j, x, y] = statistic(R[:, j, i], P[:, y, x])
//! out.shape       = (Wr, Hr, Wp, Hp)      // (lon_tar, lat_tar, lon_pre, lat_pre)
//! ```
//!
//! [`broadcast_blocks`] works on [`SeriesBlock`]s, owned cell-major copies of
//! rectangular sub-grids; it is the unit of work of the chunked executor.
//! [`pairwise_broadcast`] runs it once over two whole grids.

mod block;
mod broadcast;
mod error;
mod tensor;

pub use block::SeriesBlock;
pub use broadcast::{broadcast_blocks, pairwise_broadcast};
pub use error::BroadcastError;
pub use tensor::{DEFAULT_RESULT_NAME, PairwiseResultTensor, RESULT_DIMS};
