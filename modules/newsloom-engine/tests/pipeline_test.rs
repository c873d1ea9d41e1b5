use newsloom_common::{AgencyRatingTable, Config, Language, NewsCategory, NewsloomError, CATEGORY_ORDER};
use newsloom_engine::embedding::LanguageEmbedders;
use newsloom_engine::testutil::{doc, BrokenEmbedder, HashEmbedder};
use newsloom_engine::DigestPipeline;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn corpus() -> Vec<newsloom_common::Document> {
    let base = 1_600_000_000u64;
    vec![
        doc("council vote", "https://a.com/1", "city council vote housing plan approved", base + 100, Language::En, NewsCategory::Society),
        doc("council decision", "https://b.com/2", "city council vote housing plan passed", base + 200, Language::En, NewsCategory::Society),
        doc("rocket launch", "https://c.com/3", "rocket launch orbit satellite mission success", base + 300, Language::En, NewsCategory::Science),
        doc("match result", "https://d.com/4", "cup final striker goal stoppage time", base + 400, Language::En, NewsCategory::Sports),
        doc("выборы", "https://e.ru/5", "выборы парламент явка итоги", base + 500, Language::Ru, NewsCategory::Society),
        doc("курс рубля", "https://f.ru/6", "курс рубля банк ставка решение", base + 600, Language::Ru, NewsCategory::Economy),
    ]
}

#[test]
fn digest_buckets_are_subsequences_of_any() {
    init_tracing();
    let docs = corpus();
    let en = HashEmbedder::default();
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let config = Config {
        en_distance_threshold: 0.2,
        ru_distance_threshold: 0.2,
        ..Default::default()
    };
    let engine = DigestPipeline::new(LanguageEmbedders { en: &en, ru: &ru }, &ratings, config);

    let (clusters, digest) = engine.run(&docs).unwrap();

    assert_eq!(digest.rubrics.len(), CATEGORY_ORDER.len());
    for (rubric, &expected) in digest.rubrics.iter().zip(CATEGORY_ORDER.iter()) {
        assert_eq!(rubric.category, expected);
    }

    let any = &digest.rubric(NewsCategory::Any).unwrap().threads;
    assert_eq!(any.len(), clusters.len(), "any bucket holds every thread");

    // weight-descending, and every bucket a subsequence of `any`
    for rubric in &digest.rubrics {
        for pair in rubric.threads.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        let mut cursor = 0usize;
        for thread in &rubric.threads {
            let pos = any[cursor..]
                .iter()
                .position(|t| t.cluster == thread.cluster)
                .expect("bucket thread missing from any, or re-ordered");
            cursor += pos + 1;
        }
    }
}

#[test]
fn bucket_membership_matches_thread_categories() {
    let docs = corpus();
    let en = HashEmbedder::default();
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let engine = DigestPipeline::new(
        LanguageEmbedders { en: &en, ru: &ru },
        &ratings,
        Config::default(),
    );

    let (_, digest) = engine.run(&docs).unwrap();
    for rubric in &digest.rubrics {
        if rubric.category == NewsCategory::Any {
            continue;
        }
        for thread in &rubric.threads {
            assert_eq!(thread.category, rubric.category);
        }
    }
}

#[test]
fn thread_title_is_its_lead_document() {
    let docs = corpus();
    let en = HashEmbedder::default();
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let engine = DigestPipeline::new(
        LanguageEmbedders { en: &en, ru: &ru },
        &ratings,
        Config::default(),
    );

    let (_, digest) = engine.run(&docs).unwrap();
    for thread in &digest.rubric(NewsCategory::Any).unwrap().threads {
        assert_eq!(thread.title, docs[thread.cluster.doc_ids[0]].title);
    }
}

#[test]
fn empty_corpus_yields_empty_buckets_not_errors() {
    let en = HashEmbedder::default();
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let engine = DigestPipeline::new(
        LanguageEmbedders { en: &en, ru: &ru },
        &ratings,
        Config::default(),
    );

    let (clusters, digest) = engine.run(&[]).unwrap();
    assert!(clusters.is_empty());
    assert_eq!(digest.rubrics.len(), CATEGORY_ORDER.len());
    assert!(digest.rubrics.iter().all(|r| r.threads.is_empty()));
}

#[test]
fn dimension_contract_violation_is_an_embedding_error() {
    let docs = vec![doc(
        "x",
        "https://a.com/1",
        "some text",
        100,
        Language::En,
        NewsCategory::Other,
    )];
    let en = BrokenEmbedder;
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let engine = DigestPipeline::new(
        LanguageEmbedders { en: &en, ru: &ru },
        &ratings,
        Config::default(),
    );

    let result = engine.thread_documents(&docs);
    assert!(matches!(result, Err(NewsloomError::Embedding(_))));
}

#[test]
fn digest_serializes_for_the_output_layer() {
    let docs = corpus();
    let en = HashEmbedder::default();
    let ru = HashEmbedder::default();
    let ratings = AgencyRatingTable::default();
    let engine = DigestPipeline::new(
        LanguageEmbedders { en: &en, ru: &ru },
        &ratings,
        Config::default(),
    );

    let (_, digest) = engine.run(&docs).unwrap();
    let json = serde_json::to_value(&digest).unwrap();
    let rubrics = json["rubrics"].as_array().unwrap();
    assert_eq!(rubrics.len(), CATEGORY_ORDER.len());
    assert_eq!(rubrics[0]["category"], "any");
}
