//! Integration tests for the WordNet catalog loader.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use jrp_core::models::PartOfSpeech;
use jrp_core::{wordnet, Error};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;

fn temp_db_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("jrp-wordnet-test-{:016x}.db", rand::random::<u64>()));
    path
}

/// Build a minimal WordNet-shaped database: the `word` table with lemmas in
/// two languages and one part of speech the sampler does not recognise.
async fn fixture(path: &Path) {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .expect("options")
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.expect("connect");

    sqlx::raw_sql(
        "CREATE TABLE word (
            wordid INTEGER PRIMARY KEY,
            lang TEXT NOT NULL,
            lemma TEXT NOT NULL,
            pron TEXT,
            pos TEXT NOT NULL
        );",
    )
    .execute(&pool)
    .await
    .expect("create table");

    let rows = [
        ("jpn", "美しい", "a"),
        ("jpn", "走る", "v"),
        ("jpn", "山", "n"),
        ("jpn", "ゆっくり", "r"),
        ("eng", "mountain", "n"),
    ];
    for (lang, lemma, pos) in rows {
        sqlx::query("INSERT INTO word (lang, lemma, pron, pos) VALUES (?, ?, NULL, ?)")
            .bind(lang)
            .bind(lemma)
            .bind(pos)
            .execute(&pool)
            .await
            .expect("insert");
    }

    pool.close().await;
}

#[tokio::test]
async fn load_words_keeps_japanese_sampler_parts_of_speech_only() {
    let path = temp_db_path();
    fixture(&path).await;

    let words = wordnet::load_words(&path).await.expect("load");

    assert_eq!(words.len(), 3);
    let lemmas: Vec<&str> = words.iter().map(|w| w.lemma.as_str()).collect();
    assert!(lemmas.contains(&"美しい"));
    assert!(lemmas.contains(&"走る"));
    assert!(lemmas.contains(&"山"));
    // The adverb and the English row never reach the sampler.
    assert!(!lemmas.contains(&"ゆっくり"));
    assert!(!lemmas.contains(&"mountain"));
}

#[tokio::test]
async fn load_words_maps_part_of_speech_tags() {
    let path = temp_db_path();
    fixture(&path).await;

    let words = wordnet::load_words(&path).await.expect("load");

    let pos_of = |lemma: &str| {
        words
            .iter()
            .find(|w| w.lemma == lemma)
            .map(|w| w.pos)
            .expect("lemma present")
    };
    assert_eq!(pos_of("美しい"), PartOfSpeech::Adjective);
    assert_eq!(pos_of("走る"), PartOfSpeech::Verb);
    assert_eq!(pos_of("山"), PartOfSpeech::Noun);
}

#[tokio::test]
async fn missing_database_is_a_bootstrap_error() {
    let mut path = std::env::temp_dir();
    path.push("jrp-wordnet-test-definitely-missing.db");

    let err = wordnet::load_words(&path).await.expect_err("missing file");

    assert!(matches!(err, Error::WordnetMissing(p) if p == path));
}
