use rayon::prelude::*;

use newsloom_common::{Document, Language, NewsloomError};

/// Maps a document's text to a fixed-size dense vector.
///
/// One instance per language, supplied by the orchestrating caller as a
/// read-only capability. The engine never loads models itself.
pub trait Embedder: Sync {
    /// Vector length this embedder produces for every document.
    fn dim(&self) -> usize;

    fn embed(&self, doc: &Document) -> Vec<f32>;
}

/// The per-language embedder pair the pipeline consumes.
pub struct LanguageEmbedders<'a> {
    pub en: &'a dyn Embedder,
    pub ru: &'a dyn Embedder,
}

impl LanguageEmbedders<'_> {
    pub fn for_language(&self, language: Language) -> &dyn Embedder {
        match language {
            Language::En => self.en,
            Language::Ru => self.ru,
        }
    }
}

/// L2-normalize in place. A zero-norm vector stays zero, which makes the
/// document cosine-orthogonal to everything (itself included) instead of
/// propagating NaN into similarity and clustering.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Embed and normalize a subset of the arena, one vector per index.
///
/// Embedding is independent per document, so documents run in parallel.
/// An embedder that violates its dimension contract is an error, not a
/// panic — it is an external capability.
pub fn embed_normalized(
    docs: &[Document],
    indices: &[usize],
    embedder: &dyn Embedder,
) -> Result<Vec<Vec<f32>>, NewsloomError> {
    let dim = embedder.dim();
    indices
        .par_iter()
        .map(|&i| {
            let mut v = embedder.embed(&docs[i]);
            if v.len() != dim {
                return Err(NewsloomError::Embedding(format!(
                    "embedder returned {} dims for \"{}\", expected {dim}",
                    v.len(),
                    docs[i].title
                )));
            }
            l2_normalize(&mut v);
            Ok(v)
        })
        .collect()
}
