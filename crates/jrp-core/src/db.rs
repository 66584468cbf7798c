//! Database operations for the phrase history store.

use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::error::Result;
use crate::models::{History, NewHistory};
use crate::schema::{RESET_SEQUENCE, SCHEMA};

const SELECT_HISTORIES: &str =
    "SELECT ID, Phrase, Prefix, Suffix, IsFavorited, CreatedAt, UpdatedAt FROM jrphistory";

const INSERT_HISTORY: &str = "INSERT INTO jrphistory \
     (Phrase, Prefix, Suffix, IsFavorited, CreatedAt, UpdatedAt) \
     VALUES (?, ?, ?, ?, ?, ?)";

/// Database handle for the history store.
///
/// One handle per process, passed to whoever needs it. Every query method
/// returns rows ordered by id ascending.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a history database at the given path.
    pub async fn open(path: &Path) -> Result<Self> {
        let parent = path.parent().unwrap_or(Path::new("."));
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    /// Initialize schema.
    async fn init(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database.
    pub async fn close(self) {
        self.pool.close().await;
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert a batch of generated phrases in one transaction.
    ///
    /// Returns the saved rows with store-assigned ids, in input order. An
    /// empty batch returns an empty vec without starting a transaction. On
    /// any statement failure the transaction rolls back when dropped.
    pub async fn save_all(&self, drafts: Vec<NewHistory>) -> Result<Vec<History>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let result = sqlx::query(INSERT_HISTORY)
                .bind(&draft.phrase)
                .bind(&draft.prefix)
                .bind(&draft.suffix)
                .bind(i64::from(draft.is_favorited))
                .bind(draft.created_at.timestamp())
                .bind(draft.updated_at.timestamp())
                .execute(&mut *tx)
                .await?;

            saved.push(History {
                id: result.last_insert_rowid(),
                phrase: draft.phrase,
                prefix: draft.prefix,
                suffix: draft.suffix,
                is_favorited: draft.is_favorited,
                created_at: draft.created_at,
                updated_at: draft.updated_at,
            });
        }

        tx.commit().await?;
        Ok(saved)
    }

    // =========================================================================
    // Find
    // =========================================================================

    /// All histories, id ascending.
    pub async fn find_all(&self) -> Result<Vec<History>> {
        let sql = format!("{SELECT_HISTORIES} ORDER BY ID ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// Histories with the given favorite flag, id ascending.
    pub async fn find_by_is_favorited(&self, favorited: bool) -> Result<Vec<History>> {
        let sql = format!("{SELECT_HISTORIES} WHERE IsFavorited = ? ORDER BY ID ASC");
        let rows = sqlx::query(&sql)
            .bind(i64::from(favorited))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// The `n` rows with the largest ids, returned id ascending. The inner
    /// select orders DESC with the limit; the outer wrapper restores ASC.
    /// That shape is the user-visible "most recent, oldest first" contract.
    pub async fn find_top_n(&self, n: i64) -> Result<Vec<History>> {
        let sql = format!("SELECT * FROM ({SELECT_HISTORIES} ORDER BY ID DESC LIMIT ?) ORDER BY ID ASC");
        let rows = sqlx::query(&sql).bind(n).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// Top-n-newest intersected with the favorite flag, id ascending.
    pub async fn find_top_n_by_is_favorited(&self, n: i64, favorited: bool) -> Result<Vec<History>> {
        let sql = format!(
            "SELECT * FROM ({SELECT_HISTORIES} WHERE IsFavorited = ? ORDER BY ID DESC LIMIT ?) \
             ORDER BY ID ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(favorited))
            .bind(n)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Histories whose phrase contains the keywords as substrings,
    /// id ascending. `and` joins the keywords with AND, otherwise OR.
    ///
    /// Callers guard against an empty keyword list; the service layer never
    /// reaches the store with one.
    pub async fn find_by_phrase_contains(
        &self,
        keywords: &[String],
        and: bool,
    ) -> Result<Vec<History>> {
        let sql = format!(
            "{SELECT_HISTORIES} WHERE ({}) ORDER BY ID ASC",
            keyword_clause(keywords.len(), and)
        );
        let mut query = sqlx::query(&sql);
        for keyword in keywords {
            query = query.bind(format!("%{keyword}%"));
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// Keyword search restricted to the given favorite flag, id ascending.
    pub async fn find_by_is_favorited_and_phrase_contains(
        &self,
        favorited: bool,
        keywords: &[String],
        and: bool,
    ) -> Result<Vec<History>> {
        let sql = format!(
            "{SELECT_HISTORIES} WHERE IsFavorited = ? AND ({}) ORDER BY ID ASC",
            keyword_clause(keywords.len(), and)
        );
        let mut query = sqlx::query(&sql).bind(i64::from(favorited));
        for keyword in keywords {
            query = query.bind(format!("%{keyword}%"));
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// Top-n-newest among the keyword matches, id ascending.
    pub async fn find_top_n_by_phrase_contains(
        &self,
        keywords: &[String],
        and: bool,
        n: i64,
    ) -> Result<Vec<History>> {
        let sql = format!(
            "SELECT * FROM ({SELECT_HISTORIES} WHERE ({}) ORDER BY ID DESC LIMIT ?) \
             ORDER BY ID ASC",
            keyword_clause(keywords.len(), and)
        );
        let mut query = sqlx::query(&sql);
        for keyword in keywords {
            query = query.bind(format!("%{keyword}%"));
        }
        let rows = query.bind(n).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    /// Top-n-newest among the keyword matches with the favorite flag,
    /// id ascending.
    pub async fn find_top_n_by_is_favorited_and_phrase_contains(
        &self,
        n: i64,
        favorited: bool,
        keywords: &[String],
        and: bool,
    ) -> Result<Vec<History>> {
        let sql = format!(
            "SELECT * FROM ({SELECT_HISTORIES} WHERE IsFavorited = ? AND ({}) \
             ORDER BY ID DESC LIMIT ?) ORDER BY ID ASC",
            keyword_clause(keywords.len(), and)
        );
        let mut query = sqlx::query(&sql).bind(i64::from(favorited));
        for keyword in keywords {
            query = query.bind(format!("%{keyword}%"));
        }
        let rows = query.bind(n).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(history_from_row).collect())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete every history and reset id allocation, in one transaction.
    ///
    /// Returns the rows-affected count of the delete; zero when the store
    /// was already empty.
    pub async fn delete_all(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM jrphistory")
            .execute(&mut *tx)
            .await?;
        sqlx::query(RESET_SEQUENCE).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete histories by id. An empty id list short-circuits to zero
    /// without a round trip.
    pub async fn delete_by_id_in(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM jrphistory WHERE ID IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete histories by id, restricted to the given favorite flag.
    pub async fn delete_by_id_in_and_is_favorited(
        &self,
        ids: &[i64],
        favorited: bool,
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM jrphistory WHERE ID IN ({}) AND IsFavorited = ?",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let result = query.bind(i64::from(favorited)).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete every history with the given favorite flag.
    pub async fn delete_by_is_favorited(&self, favorited: bool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jrphistory WHERE IsFavorited = ?")
            .bind(i64::from(favorited))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    // Favorite updates
    // =========================================================================

    /// Set the favorite flag on the given ids. An empty id list
    /// short-circuits to zero without a round trip.
    ///
    /// `UpdatedAt` is deliberately left untouched by favorite updates.
    pub async fn update_is_favorited_by_id_in(
        &self,
        favorited: bool,
        ids: &[i64],
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE jrphistory SET IsFavorited = ? WHERE ID IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql).bind(i64::from(favorited));
        for id in ids {
            query = query.bind(*id);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Flip every row whose favorite flag equals `current` to `new`.
    /// Used for bulk favorite/unfavorite.
    pub async fn update_is_favorited_by_is_favorited(
        &self,
        new: bool,
        current: bool,
    ) -> Result<u64> {
        let result = sqlx::query("UPDATE jrphistory SET IsFavorited = ? WHERE IsFavorited = ?")
            .bind(i64::from(new))
            .bind(i64::from(current))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// `?, ?, ...` for an `IN` list of the given length. Values are always
/// bound positionally; user input never lands in the SQL text.
fn id_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `Phrase LIKE ? AND/OR Phrase LIKE ? ...` for the given keyword count.
fn keyword_clause(count: usize, and: bool) -> String {
    let joiner = if and { " AND " } else { " OR " };
    vec!["Phrase LIKE ?"; count].join(joiner)
}

fn history_from_row(row: &SqliteRow) -> History {
    History {
        id: row.get("ID"),
        phrase: row.get("Phrase"),
        prefix: row.get("Prefix"),
        suffix: row.get("Suffix"),
        is_favorited: row.get::<i64, _>("IsFavorited") != 0,
        created_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("CreatedAt"), 0)
            .unwrap_or_default()
            .with_timezone(&Utc),
        updated_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("UpdatedAt"), 0)
            .unwrap_or_default()
            .with_timezone(&Utc),
    }
}
