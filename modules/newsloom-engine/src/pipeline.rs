//! Batch orchestration: partition by language, embed, cluster, rank.
//!
//! The core is purely functional over its inputs. The two language
//! partitions share no state beyond read-only capabilities (embedders,
//! rating table), so they run under `rayon::join`; results are identical
//! to a sequential run.

use std::time::Instant;

use tracing::{debug, info};

use newsloom_common::{AgencyRatingTable, Config, Document, Language, NewsloomError};

use crate::clock::iteration_timestamp;
use crate::cluster::{cluster_language, Cluster};
use crate::embedding::{embed_normalized, Embedder, LanguageEmbedders};
use crate::rank::{build_digest, rank_cluster_docs, Digest};

/// Orchestrates the full clustering-and-ranking run over a document arena.
///
/// All collaborators are injected read-only capabilities owned by the
/// caller; the pipeline itself holds no cross-run state.
pub struct DigestPipeline<'a> {
    embedders: LanguageEmbedders<'a>,
    ratings: &'a AgencyRatingTable,
    config: Config,
}

impl<'a> DigestPipeline<'a> {
    pub fn new(
        embedders: LanguageEmbedders<'a>,
        ratings: &'a AgencyRatingTable,
        config: Config,
    ) -> Self {
        Self {
            embedders,
            ratings,
            config,
        }
    }

    /// The "threads" use case: partition documents into topic threads,
    /// each with members ordered by document weight descending.
    pub fn thread_documents(&self, docs: &[Document]) -> Result<Vec<Cluster>, NewsloomError> {
        let started = Instant::now();

        // Fetch-time order within each partition, stable, so the threshold
        // cut sees the same input order on every run.
        let mut en_indices: Vec<usize> = Vec::new();
        let mut ru_indices: Vec<usize> = Vec::new();
        for (i, doc) in docs.iter().enumerate() {
            match doc.language {
                Language::En => en_indices.push(i),
                Language::Ru => ru_indices.push(i),
            }
        }
        en_indices.sort_by_key(|&i| docs[i].fetch_time);
        ru_indices.sort_by_key(|&i| docs[i].fetch_time);

        let (en_result, ru_result) = rayon::join(
            || {
                cluster_partition(
                    docs,
                    &en_indices,
                    self.embedders.en,
                    self.config.en_distance_threshold,
                )
            },
            || {
                cluster_partition(
                    docs,
                    &ru_indices,
                    self.embedders.ru,
                    self.config.ru_distance_threshold,
                )
            },
        );
        let (mut clusters, en_embeddings) = en_result?;
        let (ru_clusters, ru_embeddings) = ru_result?;
        clusters.extend(ru_clusters);

        // Arena-parallel embedding cache, reused for per-cluster relevance.
        let mut embeddings: Vec<Vec<f32>> = vec![Vec::new(); docs.len()];
        for (&i, embedding) in en_indices.iter().zip(en_embeddings) {
            embeddings[i] = embedding;
        }
        for (&i, embedding) in ru_indices.iter().zip(ru_embeddings) {
            embeddings[i] = embedding;
        }

        info!(
            docs = docs.len(),
            en = en_indices.len(),
            ru = ru_indices.len(),
            clusters = clusters.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Clustering complete"
        );

        Ok(rank_cluster_docs(docs, &embeddings, clusters, self.ratings))
    }

    /// The "top" use case: iteration clock over all fetch times, then
    /// weigh, categorize, and bucket the already doc-ranked threads.
    pub fn build_digest(&self, docs: &[Document], ranked_clusters: &[Cluster]) -> Digest {
        let clock = iteration_timestamp(
            docs,
            ranked_clusters,
            self.config.iter_timestamp_percentile,
        );
        debug!(iteration_clock = clock, "Iteration clock estimated");
        build_digest(docs, ranked_clusters, self.ratings, clock)
    }

    /// Both stages in one call.
    pub fn run(&self, docs: &[Document]) -> Result<(Vec<Cluster>, Digest), NewsloomError> {
        let ranked = self.thread_documents(docs)?;
        let digest = self.build_digest(docs, &ranked);
        Ok((ranked, digest))
    }
}

fn cluster_partition(
    docs: &[Document],
    indices: &[usize],
    embedder: &dyn Embedder,
    distance_threshold: f32,
) -> Result<(Vec<Cluster>, Vec<Vec<f32>>), NewsloomError> {
    if indices.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let embeddings = embed_normalized(docs, indices, embedder)?;
    let clusters = cluster_language(indices, &embeddings, distance_threshold);
    debug!(
        docs = indices.len(),
        clusters = clusters.len(),
        distance_threshold,
        "Language partition clustered"
    );
    Ok((clusters, embeddings))
}
