//! Outer-product application of a statistic over two blocks of series.

use cpa_grid::{LabeledSeries3D, SpatialIndexPair};
use cpa_stats::Statistic;
use ndarray::Array4;
use tracing::debug;

use crate::block::SeriesBlock;
use crate::error::BroadcastError;
use crate::tensor::PairwiseResultTensor;

/// Applies `statistic` to every (response cell, predictor cell) pair of two
/// blocks.
///
/// Returns an array of shape `(lon_r, lat_r, lon_p, lat_p)` in block-local
/// indices: element `(i, j, x, y)` scores `response.series(j, i)` against
/// `predictor.series(y, x)`.
///
/// # Errors
///
/// Returns [`BroadcastError::DimensionMismatch`] if the blocks have different
/// time lengths, or [`BroadcastError::Statistic`] (with global cell indices)
/// for the first pair whose statistic fails.
pub fn broadcast_blocks<S>(
    response: &SeriesBlock,
    predictor: &SeriesBlock,
    statistic: &S,
) -> Result<Array4<f64>, BroadcastError>
where
    S: Statistic + ?Sized,
{
    if response.n_time() != predictor.n_time() {
        return Err(BroadcastError::DimensionMismatch {
            axis: "time",
            response: response.n_time(),
            predictor: predictor.n_time(),
        });
    }

    let shape = (
        response.n_lon(),
        response.n_lat(),
        predictor.n_lon(),
        predictor.n_lat(),
    );
    let mut out = Array4::<f64>::zeros(shape);

    // One pass over the output index space; each element is one series pair.
    for ((i, j, x, y), cell) in out.indexed_iter_mut() {
        *cell = statistic
            .evaluate(response.series(j, i), predictor.series(y, x))
            .map_err(|source| BroadcastError::Statistic {
                response: SpatialIndexPair::new(
                    response.lat_range().start + j,
                    response.lon_range().start + i,
                ),
                predictor: SpatialIndexPair::new(
                    predictor.lat_range().start + y,
                    predictor.lon_range().start + x,
                ),
                source,
            })?;
    }

    Ok(out)
}

/// Applies `statistic` to every pair of cells of two whole grids.
///
/// Single-threaded counterpart of the chunked executor: the result has shape
/// `(Wr, Hr, Wp, Hp)` and carries the response and predictor coordinates.
/// Time labels are not compared, only time lengths.
///
/// # Errors
///
/// Returns [`BroadcastError::DimensionMismatch`] if the time lengths differ,
/// or [`BroadcastError::Statistic`] if any pair fails.
#[tracing::instrument(skip_all, fields(response = ?response.shape(), predictor = ?predictor.shape()))]
pub fn pairwise_broadcast<S>(
    response: &LabeledSeries3D,
    predictor: &LabeledSeries3D,
    statistic: &S,
) -> Result<PairwiseResultTensor, BroadcastError>
where
    S: Statistic + ?Sized,
{
    if response.n_time() != predictor.n_time() {
        return Err(BroadcastError::DimensionMismatch {
            axis: "time",
            response: response.n_time(),
            predictor: predictor.n_time(),
        });
    }

    let values = broadcast_blocks(
        &SeriesBlock::whole(response),
        &SeriesBlock::whole(predictor),
        statistic,
    )?;
    debug!(n_pairs = values.len(), "pairwise broadcast complete");

    PairwiseResultTensor::new(
        values,
        response.lon().to_vec(),
        response.lat().to_vec(),
        predictor.lon().to_vec(),
        predictor.lat().to_vec(),
    )
}
