//! Test utilities: a deterministic embedder and document builders, so
//! clustering and ranking tests run without model files.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use newsloom_common::{Document, Language, NewsCategory};

use crate::embedding::Embedder;

/// Token-hash bag-of-words embedder. Near-identical texts map to
/// near-identical vectors; disjoint vocabularies map far apart. Empty text
/// maps to the zero vector, which is handy for degenerate-document tests.
pub struct HashEmbedder {
    pub dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dim: 32 }
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, doc: &Document) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        for token in doc.text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            v[(hasher.finish() as usize) % self.dim] += 1.0;
        }
        v
    }
}

/// An embedder that always reports the wrong vector length, for testing
/// the dimension-contract error path.
pub struct BrokenEmbedder;

impl Embedder for BrokenEmbedder {
    fn dim(&self) -> usize {
        8
    }

    fn embed(&self, _doc: &Document) -> Vec<f32> {
        vec![1.0; 3]
    }
}

pub fn doc(
    title: &str,
    url: &str,
    text: &str,
    fetch_time: u64,
    language: Language,
    category: NewsCategory,
) -> Document {
    Document {
        title: title.to_string(),
        url: url.to_string(),
        site_name: newsloom_common::rating::normalize_host(url),
        text: text.to_string(),
        fetch_time,
        language,
        category,
    }
}

/// English society-rubric document, the common case in tests.
pub fn en_doc(title: &str, url: &str, text: &str, fetch_time: u64) -> Document {
    doc(
        title,
        url,
        text,
        fetch_time,
        Language::En,
        NewsCategory::Society,
    )
}
