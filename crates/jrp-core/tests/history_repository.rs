//! Integration tests for the history repository.

use chrono::Utc;
use jrp_core::models::NewHistory;
use jrp_core::Database;

fn temp_db_path() -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let filename = format!("jrp-test-{:016x}.db", rand::random::<u64>());
    path.push(filename);
    path
}

fn draft(phrase: &str) -> NewHistory {
    let now = Utc::now();
    NewHistory {
        phrase: phrase.to_string(),
        prefix: None,
        suffix: None,
        is_favorited: false,
        created_at: now,
        updated_at: now,
    }
}

fn draft_with_prefix(phrase: &str, prefix: &str) -> NewHistory {
    NewHistory {
        prefix: Some(prefix.to_string()),
        ..draft(phrase)
    }
}

fn draft_with_suffix(phrase: &str, suffix: &str) -> NewHistory {
    NewHistory {
        suffix: Some(suffix.to_string()),
        ..draft(phrase)
    }
}

// ============================================================================
// Insert
// ============================================================================

#[tokio::test]
async fn save_all_assigns_sequential_ids_in_input_order() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    let saved = db
        .save_all(vec![
            draft_with_prefix("ab", "a"),
            draft_with_suffix("bc", "c"),
        ])
        .await
        .expect("save");

    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].id, 1);
    assert_eq!(saved[1].id, 2);
    assert_eq!(saved[0].phrase, "ab");
    assert_eq!(saved[1].phrase, "bc");

    let all = db.find_all().await.expect("find");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[1].id, 2);
}

#[tokio::test]
async fn save_all_empty_batch_is_a_no_op() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    let saved = db.save_all(Vec::new()).await.expect("save");
    assert!(saved.is_empty());
    assert!(db.find_all().await.expect("find").is_empty());
}

#[tokio::test]
async fn save_all_ids_keep_increasing_across_batches() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    db.save_all(vec![draft("one"), draft("two")])
        .await
        .expect("first batch");
    db.delete_by_id_in(&[2]).await.expect("delete");

    let saved = db.save_all(vec![draft("three")]).await.expect("second batch");
    // Deleted ids are never reused.
    assert_eq!(saved[0].id, 3);
}

#[tokio::test]
async fn round_trip_preserves_all_fields() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    let saved = db
        .save_all(vec![draft_with_prefix("水晶", "水")])
        .await
        .expect("save");

    let all = db.find_all().await.expect("find");
    assert_eq!(all.len(), 1);
    let read = &all[0];
    assert_eq!(read.id, saved[0].id);
    assert_eq!(read.phrase, "水晶");
    assert_eq!(read.prefix, Some("水".to_string()));
    assert_eq!(read.suffix, None);
    assert!(!read.is_favorited);
    // Timestamps are stored with second precision.
    assert_eq!(read.created_at.timestamp(), saved[0].created_at.timestamp());
    assert_eq!(read.updated_at.timestamp(), saved[0].updated_at.timestamp());
}

#[tokio::test]
async fn absent_prefix_is_distinct_from_empty_string() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    db.save_all(vec![draft("bare"), draft_with_prefix("pinned", "")])
        .await
        .expect("save");

    let all = db.find_all().await.expect("find");
    assert_eq!(all[0].prefix, None);
    assert_eq!(all[1].prefix, Some(String::new()));
}

// ============================================================================
// Find
// ============================================================================

async fn seed(db: &Database, phrases: &[&str]) {
    let drafts = phrases.iter().map(|p| draft(p)).collect();
    db.save_all(drafts).await.expect("seed");
}

#[tokio::test]
async fn find_by_is_favorited_filters_on_flag() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three"]).await;
    db.update_is_favorited_by_id_in(true, &[2])
        .await
        .expect("favorite");

    let favorites = db.find_by_is_favorited(true).await.expect("find");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 2);

    let rest = db.find_by_is_favorited(false).await.expect("find");
    assert_eq!(rest.len(), 2);
}

#[tokio::test]
async fn find_top_n_returns_newest_ids_oldest_first() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three", "four", "five"]).await;

    let top = db.find_top_n(3).await.expect("find");

    let ids: Vec<i64> = top.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);
}

#[tokio::test]
async fn find_top_n_with_fewer_rows_returns_everything() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two"]).await;

    let top = db.find_top_n(10).await.expect("find");
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id, 1);
}

#[tokio::test]
async fn find_top_n_by_is_favorited_intersects_flag_and_recency() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three", "four"]).await;
    db.update_is_favorited_by_id_in(true, &[1, 2, 4])
        .await
        .expect("favorite");

    let top = db.find_top_n_by_is_favorited(2, true).await.expect("find");

    let ids: Vec<i64> = top.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![2, 4]);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn search_single_keyword_matches_substring() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["test only", "other phrase", "also a test"]).await;

    let hits = db
        .find_by_phrase_contains(&["test".to_string()], true)
        .await
        .expect("search");

    let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn search_and_returns_intersection_or_returns_union() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["alpha beta", "alpha", "beta", "gamma"]).await;
    let keywords = vec!["alpha".to_string(), "beta".to_string()];

    let both = db.find_by_phrase_contains(&keywords, true).await.expect("and");
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].phrase, "alpha beta");

    let either = db.find_by_phrase_contains(&keywords, false).await.expect("or");
    let ids: Vec<i64> = either.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn search_top_n_keeps_newest_matches_oldest_first() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["test only", "test match both", "test match also"]).await;
    let keywords = vec!["test".to_string(), "match".to_string()];

    let hits = db
        .find_top_n_by_phrase_contains(&keywords, true, 2)
        .await
        .expect("search");

    let phrases: Vec<&str> = hits.iter().map(|h| h.phrase.as_str()).collect();
    assert_eq!(phrases, vec!["test match both", "test match also"]);
}

#[tokio::test]
async fn search_with_favorited_filter() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["match one", "match two", "match three"]).await;
    db.update_is_favorited_by_id_in(true, &[2, 3])
        .await
        .expect("favorite");
    let keywords = vec!["match".to_string()];

    let hits = db
        .find_by_is_favorited_and_phrase_contains(true, &keywords, true)
        .await
        .expect("search");
    let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![2, 3]);

    let top = db
        .find_top_n_by_is_favorited_and_phrase_contains(1, true, &keywords, true)
        .await
        .expect("search");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, 3);
}

// ============================================================================
// Favorite updates
// ============================================================================

#[tokio::test]
async fn update_by_id_in_reports_rows_affected() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two"]).await;

    let updated = db
        .update_is_favorited_by_id_in(true, &[2, 99])
        .await
        .expect("update");
    assert_eq!(updated, 1);

    let favorites = db.find_by_is_favorited(true).await.expect("find");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 2);
}

#[tokio::test]
async fn update_by_id_in_empty_list_short_circuits() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one"]).await;

    let updated = db.update_is_favorited_by_id_in(true, &[]).await.expect("update");
    assert_eq!(updated, 0);
    assert!(db.find_by_is_favorited(true).await.expect("find").is_empty());
}

#[tokio::test]
async fn bulk_favorite_flips_exactly_the_unfavorited_rows() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three"]).await;
    db.update_is_favorited_by_id_in(true, &[1])
        .await
        .expect("pre-favorite");

    let updated = db
        .update_is_favorited_by_is_favorited(true, false)
        .await
        .expect("bulk");

    assert_eq!(updated, 2);
    assert_eq!(db.find_by_is_favorited(true).await.expect("find").len(), 3);
    assert!(db.find_by_is_favorited(false).await.expect("find").is_empty());
}

#[tokio::test]
async fn favorite_update_does_not_bump_updated_at() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one"]).await;
    let before = &db.find_all().await.expect("find")[0];
    let stamp = before.updated_at;

    db.update_is_favorited_by_id_in(true, &[1])
        .await
        .expect("favorite");

    let after = &db.find_all().await.expect("find")[0];
    assert!(after.is_favorited);
    assert_eq!(after.updated_at, stamp);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_by_id_in_reports_rows_affected() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three"]).await;

    let removed = db.delete_by_id_in(&[1, 3, 99]).await.expect("delete");
    assert_eq!(removed, 2);

    let all = db.find_all().await.expect("find");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 2);
}

#[tokio::test]
async fn delete_by_id_in_empty_list_short_circuits() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one"]).await;

    let removed = db.delete_by_id_in(&[]).await.expect("delete");
    assert_eq!(removed, 0);
    assert_eq!(db.find_all().await.expect("find").len(), 1);
}

#[tokio::test]
async fn delete_by_id_in_and_is_favorited_spares_mismatched_rows() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two"]).await;
    db.update_is_favorited_by_id_in(true, &[2])
        .await
        .expect("favorite");

    let removed = db
        .delete_by_id_in_and_is_favorited(&[1, 2], false)
        .await
        .expect("delete");

    assert_eq!(removed, 1);
    let all = db.find_all().await.expect("find");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 2);
}

#[tokio::test]
async fn delete_by_is_favorited_keeps_favorites_intact() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three"]).await;
    db.update_is_favorited_by_id_in(true, &[2])
        .await
        .expect("favorite");

    let removed = db.delete_by_is_favorited(false).await.expect("delete");

    assert_eq!(removed, 2);
    let all = db.find_all().await.expect("find");
    assert_eq!(all.len(), 1);
    assert!(all[0].is_favorited);
}

#[tokio::test]
async fn delete_all_resets_id_allocation() {
    let db = Database::open(&temp_db_path()).await.expect("open db");
    seed(&db, &["one", "two", "three"]).await;

    let removed = db.delete_all().await.expect("delete all");
    assert_eq!(removed, 3);
    assert!(db.find_all().await.expect("find").is_empty());

    let saved = db.save_all(vec![draft("fresh")]).await.expect("save");
    assert_eq!(saved[0].id, 1);
}

#[tokio::test]
async fn delete_all_on_empty_store_returns_zero() {
    let db = Database::open(&temp_db_path()).await.expect("open db");

    let removed = db.delete_all().await.expect("delete all");
    assert_eq!(removed, 0);
}
