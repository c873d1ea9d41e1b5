use serde::Serialize;

use newsloom_common::Document;

use crate::slink::slink;

/// A topic thread: arena indices of the documents judged to report the same
/// event. Non-empty by construction; order is meaningful only after the
/// ranking stage re-sorts members by weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub doc_ids: Vec<usize>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Maximum fetch time among members, the reference point for
    /// intra-cluster time decay.
    pub fn freshest_timestamp(&self, docs: &[Document]) -> u64 {
        self.doc_ids
            .iter()
            .map(|&i| docs[i].fetch_time)
            .max()
            .unwrap_or(0)
    }
}

/// Partition one language's documents into threads.
///
/// `indices` are arena positions of the partition's documents and
/// `embeddings` their normalized vectors, parallel to `indices`. The cut
/// never produces duplicate, missing, or empty clusters.
pub fn cluster_language(
    indices: &[usize],
    embeddings: &[Vec<f32>],
    distance_threshold: f32,
) -> Vec<Cluster> {
    debug_assert_eq!(indices.len(), embeddings.len());
    if indices.is_empty() {
        return Vec::new();
    }

    slink(embeddings)
        .cut(distance_threshold)
        .into_iter()
        .map(|members| Cluster {
            doc_ids: members.into_iter().map(|k| indices[k]).collect(),
        })
        .collect()
}
