use serde::{Deserialize, Serialize};

// --- Enums ---

/// Languages the engine carries embedding models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Ru,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ru => write!(f, "ru"),
        }
    }
}

/// News rubric assigned by the upstream category classifier.
///
/// `Any` is the synthetic union rubric used only for digest bucketing.
/// Documents themselves are never tagged `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Any,
    Society,
    Economy,
    Technology,
    Sports,
    Entertainment,
    Science,
    Other,
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsCategory::Any => write!(f, "any"),
            NewsCategory::Society => write!(f, "society"),
            NewsCategory::Economy => write!(f, "economy"),
            NewsCategory::Technology => write!(f, "technology"),
            NewsCategory::Sports => write!(f, "sports"),
            NewsCategory::Entertainment => write!(f, "entertainment"),
            NewsCategory::Science => write!(f, "science"),
            NewsCategory::Other => write!(f, "other"),
        }
    }
}

/// Fixed rubric order of the digest output. `Any` comes first and receives
/// every thread.
pub const CATEGORY_ORDER: [NewsCategory; 8] = [
    NewsCategory::Any,
    NewsCategory::Society,
    NewsCategory::Economy,
    NewsCategory::Technology,
    NewsCategory::Sports,
    NewsCategory::Entertainment,
    NewsCategory::Science,
    NewsCategory::Other,
];

// --- Documents ---

/// A parsed, annotated news article.
///
/// Immutable once ingested. The engine never copies documents around;
/// identity is the index into the caller-owned arena (`&[Document]`), so
/// clusters can reference members cheaply and host/category lookups stay
/// identity-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub site_name: String,
    pub text: String,
    /// Epoch seconds reported by the fetcher. A small fraction may be
    /// corrupted, which is why ranking anchors on the iteration clock
    /// rather than wall-clock time.
    pub fetch_time: u64,
    pub language: Language,
    pub category: NewsCategory,
}
