//! Read-only catalog loader for the Japanese WordNet database.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Row;

use crate::error::{Error, Result};
use crate::models::{PartOfSpeech, Word};

/// File name of the WordNet database inside the data directory.
pub const WORDNET_DB_FILE: &str = "wnjpn.db";

/// Load every Japanese lemma the sampler can use.
///
/// Only the three parts of speech the sampler recognises are fetched; the
/// rest of WordNet never leaves the file. A missing file maps to
/// [`Error::WordnetMissing`] so the CLI can point the user at `jrp download`
/// instead of surfacing a driver error.
pub async fn load_words(path: &Path) -> Result<Vec<Word>> {
    if !path.exists() {
        return Err(Error::WordnetMissing(path.to_path_buf()));
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    let rows =
        sqlx::query("SELECT lemma, pos FROM word WHERE lang = 'jpn' AND pos IN ('a', 'v', 'n')")
            .fetch_all(&pool)
            .await?;

    let words = rows
        .iter()
        .map(|row| Word {
            lemma: row.get("lemma"),
            pos: PartOfSpeech::from(row.get::<&str, _>("pos")),
        })
        .collect::<Vec<_>>();

    pool.close().await;
    tracing::debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
