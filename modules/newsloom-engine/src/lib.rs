pub mod clock;
pub mod cluster;
pub mod embedding;
pub mod pipeline;
pub mod rank;
pub mod similarity;
pub mod slink;
pub mod testutil;

pub use cluster::Cluster;
pub use embedding::{Embedder, LanguageEmbedders};
pub use pipeline::DigestPipeline;
pub use rank::{Digest, RubricDigest, WeightedCluster};
pub use similarity::SimilarityMatrix;
