//! Iteration clock: a robust corpus-wide "now".
//!
//! A high percentile of document fetch times stands in for wall-clock time,
//! so a small fraction of corrupted, future, or ancient timestamps cannot
//! skew the time-decay scoring. This substitution is deliberate — do not
//! replace it with the actual current time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use newsloom_common::Document;

use crate::cluster::Cluster;

/// Iteration clock over every document in the given clusters.
/// Empty input yields 0.
pub fn iteration_timestamp(docs: &[Document], clusters: &[Cluster], percentile: f64) -> u64 {
    let total: usize = clusters.iter().map(Cluster::len).sum();
    let timestamps = clusters
        .iter()
        .flat_map(|c| c.doc_ids.iter().map(|&i| docs[i].fetch_time));
    percentile_timestamp(timestamps, total, percentile)
}

/// Value at the `percentile` position of a timestamp stream of known
/// length, in one pass and bounded memory.
///
/// A min-heap retains only the top `n - floor(p * n)` values; after the
/// stream is exhausted its head (the smallest retained value) is the
/// answer, matching `sorted[floor(p * n)]` from a full-sort reference.
pub fn percentile_timestamp(
    timestamps: impl IntoIterator<Item = u64>,
    n: usize,
    percentile: f64,
) -> u64 {
    if n == 0 {
        return 0;
    }
    let keep = (n - (percentile * n as f64).floor() as usize).max(1);

    let mut heap: BinaryHeap<Reverse<u64>> = BinaryHeap::with_capacity(keep + 1);
    for ts in timestamps {
        heap.push(Reverse(ts));
        if heap.len() > keep {
            heap.pop();
        }
    }

    heap.peek().map(|&Reverse(ts)| ts).unwrap_or(0)
}
