//! Ranking helpers.

use std::cmp::Ordering;

/// Indices that sort `data` ascending. Ties keep their original order.
fn argsort(data: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));
    order
}

/// 1-based ranks where tied values share the mean of their positions.
///
/// Matches `scipy.stats.rankdata(method="average")`.
pub fn midranks(data: &[f64]) -> Vec<f64> {
    let order = argsort(data);
    let mut ranks = vec![0.0; data.len()];

    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && data[order[end]] == data[order[start]] {
            end += 1;
        }
        // positions start..end (0-based) hold one tie group
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }

    ranks
}

/// 1-based class labels: the k-th smallest distinct value gets label k.
///
/// Matches `scipy.stats.rankdata(method="dense")`.
pub fn dense_ranks(data: &[f64]) -> Vec<f64> {
    let order = argsort(data);
    let mut ranks = vec![0.0; data.len()];

    let mut class = 0.0;
    let mut previous: Option<f64> = None;
    for &idx in &order {
        if previous != Some(data[idx]) {
            class += 1.0;
            previous = Some(data[idx]);
        }
        ranks[idx] = class;
    }

    ranks
}
