//! Use-case layer: maps user intents onto repository primitives.
//!
//! Each method issues exactly one repository call. Write operations that
//! matched no rows come back as [`Error::NothingToDo`], which the CLI
//! renders as a neutral notice rather than a failure.

use crate::db::Database;
use crate::error::{Error, Result};
use crate::generator;
use crate::models::{GenerateMode, History, NewHistory, Word};

pub struct HistoryService {
    db: Database,
}

impl HistoryService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Consume the service and close the underlying database.
    pub async fn close(self) {
        self.db.close().await;
    }

    /// Sample up to `count` phrases from the catalog. The result may be
    /// shorter than `count`; the caller decides how to surface that.
    pub fn generate(&self, words: &[Word], mode: &GenerateMode, count: usize) -> Vec<NewHistory> {
        let mut rng = rand::rng();
        generator::generate_batch(words, mode, count, &mut rng)
    }

    /// Persist a batch of generated phrases and return them with ids.
    pub async fn save(&self, drafts: Vec<NewHistory>) -> Result<Vec<History>> {
        self.db.save_all(drafts).await
    }

    /// Retrieve histories. `all` selects the whole store instead of the
    /// newest `n`; `favorited` restricts to favorites. Rows always come
    /// back id ascending.
    pub async fn list(&self, all: bool, favorited: bool, n: i64) -> Result<Vec<History>> {
        match (all, favorited) {
            (true, true) => self.db.find_by_is_favorited(true).await,
            (true, false) => self.db.find_all().await,
            (false, true) => self.db.find_top_n_by_is_favorited(n, true).await,
            (false, false) => self.db.find_top_n(n).await,
        }
    }

    /// Keyword search over phrases with the same `all`/`favorited` shaping
    /// as [`HistoryService::list`]. An empty keyword list returns an empty
    /// result without touching the store.
    pub async fn search(
        &self,
        keywords: &[String],
        and: bool,
        all: bool,
        favorited: bool,
        n: i64,
    ) -> Result<Vec<History>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        match (all, favorited) {
            (true, true) => {
                self.db
                    .find_by_is_favorited_and_phrase_contains(true, keywords, and)
                    .await
            }
            (true, false) => self.db.find_by_phrase_contains(keywords, and).await,
            (false, true) => {
                self.db
                    .find_top_n_by_is_favorited_and_phrase_contains(n, true, keywords, and)
                    .await
            }
            (false, false) => {
                self.db
                    .find_top_n_by_phrase_contains(keywords, and, n)
                    .await
            }
        }
    }

    /// Mark histories as favorites, either the given ids or every
    /// non-favorited row.
    pub async fn favorite(&self, ids: &[i64], all: bool) -> Result<u64> {
        let updated = if all {
            self.db.update_is_favorited_by_is_favorited(true, false).await?
        } else {
            self.db.update_is_favorited_by_id_in(true, ids).await?
        };

        if updated == 0 {
            return Err(Error::NothingToDo("no histories to favorite"));
        }
        Ok(updated)
    }

    /// Clear the favorite flag, either on the given ids or on every
    /// favorited row.
    pub async fn unfavorite(&self, ids: &[i64], all: bool) -> Result<u64> {
        let updated = if all {
            self.db.update_is_favorited_by_is_favorited(false, true).await?
        } else {
            self.db.update_is_favorited_by_id_in(false, ids).await?
        };

        if updated == 0 {
            return Err(Error::NothingToDo("no favorited histories to unfavorite"));
        }
        Ok(updated)
    }

    /// Delete histories. Without `force`, favorites survive: the bulk form
    /// only deletes non-favorited rows and the id form is restricted to
    /// them. `all` with `force` clears the store and resets id allocation.
    pub async fn remove(&self, ids: &[i64], all: bool, force: bool) -> Result<u64> {
        let removed = match (all, force) {
            (true, true) => self.db.delete_all().await?,
            (true, false) => self.db.delete_by_is_favorited(false).await?,
            (false, true) => self.db.delete_by_id_in(ids).await?,
            (false, false) => self.db.delete_by_id_in_and_is_favorited(ids, false).await?,
        };

        if removed == 0 {
            return Err(Error::NothingToDo("no histories to remove"));
        }
        Ok(removed)
    }
}
