//! Document and thread scoring: pure functions plus the digest assembly.
//!
//! Two independent scores compose the output. Per-document weight orders
//! members inside a thread; per-thread weight orders threads inside each
//! rubric bucket. Both decay with the same logistic curve, anchored to the
//! cluster's freshest member and to the iteration clock respectively.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use newsloom_common::{
    rating::normalize_host, AgencyRatingTable, Document, NewsCategory, CATEGORY_ORDER,
};

use crate::cluster::Cluster;
use crate::similarity::SimilarityMatrix;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Time-decay multiplier: ~1 for a timestamp at the reference, 0.5 at
/// 12 hours older, ~0 at 24+ hours older.
pub fn time_multiplier(fetch_time: u64, reference: u64) -> f64 {
    sigmoid((fetch_time as f64 - reference as f64) / 3600.0 + 12.0)
}

/// Intra-cluster document weight: reputation plus relevance, decayed
/// against the freshest member.
pub fn doc_weight(
    doc: &Document,
    ratings: &AgencyRatingTable,
    relevance: f64,
    freshest_timestamp: u64,
) -> f64 {
    (ratings.score(&doc.url) + relevance) * time_multiplier(doc.fetch_time, freshest_timestamp)
}

/// Thin-corroboration penalty. Only clusters with fewer than five members
/// are pessimized, regardless of source reputation.
pub fn small_cluster_coefficient(size: usize) -> f64 {
    debug_assert!(size > 0, "empty cluster has no coefficient");
    match size {
        1 => 0.2,
        2 => 0.4,
        3 => 0.6,
        4 => 0.8,
        _ => 1.0,
    }
}

/// 90th-percentile fetch time of the cluster, the timestamp a thread decays
/// from. More robust than the maximum against a single corrupted date.
pub fn cluster_timestamp(docs: &[Document], cluster: &Cluster) -> u64 {
    debug_assert!(!cluster.is_empty(), "empty cluster reached ranking");
    let mut timestamps: Vec<u64> = cluster.doc_ids.iter().map(|&i| docs[i].fetch_time).collect();
    timestamps.sort_unstable();
    timestamps[(0.9 * (timestamps.len() - 1) as f64).floor() as usize]
}

/// Thread weight: distinct-host agency mass (each host counted once, so
/// source diversity is rewarded over volume), decayed against the iteration
/// clock and scaled by the small-cluster coefficient.
pub fn cluster_weight(
    docs: &[Document],
    cluster: &Cluster,
    ratings: &AgencyRatingTable,
    iteration_clock: u64,
) -> f64 {
    debug_assert!(!cluster.is_empty(), "empty cluster reached ranking");
    let mut seen_hosts: HashSet<String> = HashSet::new();
    let mut agency_mass = 0.0;
    for &id in &cluster.doc_ids {
        if seen_hosts.insert(normalize_host(&docs[id].url)) {
            agency_mass += ratings.score(&docs[id].url);
        }
    }

    agency_mass
        * time_multiplier(cluster_timestamp(docs, cluster), iteration_clock)
        * small_cluster_coefficient(cluster.len())
}

/// Plurality vote over member categories. Ties go to the category whose
/// first document appears earliest in the cluster, keeping the vote
/// deterministic for identical input.
pub fn cluster_category(docs: &[Document], cluster: &Cluster) -> NewsCategory {
    debug_assert!(!cluster.is_empty(), "empty cluster reached ranking");
    let mut order: Vec<NewsCategory> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for &id in &cluster.doc_ids {
        let category = docs[id].category;
        match order.iter().position(|&c| c == category) {
            Some(k) => counts[k] += 1,
            None => {
                order.push(category);
                counts.push(1);
            }
        }
    }

    let mut best = 0;
    for k in 1..order.len() {
        if counts[k] > counts[best] {
            best = k;
        }
    }
    order[best]
}

/// Re-order every cluster's members by document weight, descending and
/// stable. Relevance is the row mean of the cluster's cosine matrix,
/// computed from the per-document embedding cache (arena-parallel).
pub fn rank_cluster_docs(
    docs: &[Document],
    embeddings: &[Vec<f32>],
    clusters: Vec<Cluster>,
    ratings: &AgencyRatingTable,
) -> Vec<Cluster> {
    clusters
        .into_iter()
        .map(|cluster| {
            debug_assert!(!cluster.is_empty(), "empty cluster reached ranking");
            let freshest = cluster.freshest_timestamp(docs);
            let rows: Vec<&[f32]> = cluster
                .doc_ids
                .iter()
                .map(|&i| embeddings[i].as_slice())
                .collect();
            let cosine = SimilarityMatrix::build(&rows);

            let mut weighted: Vec<(usize, f64)> = cluster
                .doc_ids
                .iter()
                .enumerate()
                .map(|(row, &id)| {
                    let relevance = cosine.row_mean(row);
                    (id, doc_weight(&docs[id], ratings, relevance, freshest))
                })
                .collect();
            // stable: equal weights preserve relative input order
            weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

            Cluster {
                doc_ids: weighted.into_iter().map(|(id, _)| id).collect(),
            }
        })
        .collect()
}

// --- Digest assembly ---

/// A ranked thread ready for the digest.
#[derive(Debug, Clone, Serialize)]
pub struct WeightedCluster {
    pub cluster: Cluster,
    pub category: NewsCategory,
    /// Title of the thread's lead document (first after intra-cluster sort).
    pub title: String,
    pub weight: f64,
}

/// One rubric of the digest, threads weight-descending.
#[derive(Debug, Clone, Serialize)]
pub struct RubricDigest {
    pub category: NewsCategory,
    pub threads: Vec<WeightedCluster>,
}

/// The "top" output: one bucket per rubric in [`CATEGORY_ORDER`]; `any`
/// holds every thread. Buckets are filtered from a single global sort, so
/// each bucket's order is a subsequence of the `any` bucket's.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub rubrics: Vec<RubricDigest>,
}

impl Digest {
    pub fn rubric(&self, category: NewsCategory) -> Option<&RubricDigest> {
        self.rubrics.iter().find(|r| r.category == category)
    }
}

/// Weigh, categorize, and bucket already doc-ranked clusters.
pub fn build_digest(
    docs: &[Document],
    clusters: &[Cluster],
    ratings: &AgencyRatingTable,
    iteration_clock: u64,
) -> Digest {
    let mut weighted: Vec<WeightedCluster> = clusters
        .iter()
        .map(|cluster| WeightedCluster {
            category: cluster_category(docs, cluster),
            title: docs[cluster.doc_ids[0]].title.clone(),
            weight: cluster_weight(docs, cluster, ratings, iteration_clock),
            cluster: cluster.clone(),
        })
        .collect();
    weighted.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    let rubrics: Vec<RubricDigest> = CATEGORY_ORDER
        .iter()
        .map(|&category| RubricDigest {
            category,
            threads: weighted
                .iter()
                .filter(|wc| category == NewsCategory::Any || wc.category == category)
                .cloned()
                .collect(),
        })
        .collect();

    debug!(
        threads = weighted.len(),
        iteration_clock, "Digest buckets assembled"
    );
    Digest { rubrics }
}
