//! Database schema for the phrase history store.

/// History table definition. The column layout matches databases created by
/// earlier releases of the tool, so an existing history file keeps working.
/// Timestamps are stored as Unix epoch seconds.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jrphistory (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Phrase TEXT NOT NULL,
    Prefix TEXT,
    Suffix TEXT,
    IsFavorited INTEGER DEFAULT 0,
    CreatedAt TIMESTAMP NOT NULL,
    UpdatedAt TIMESTAMP NOT NULL
);
"#;

/// Resets id allocation after a full-table delete so the next insert gets
/// id 1 again. `sqlite_sequence` exists from the moment the AUTOINCREMENT
/// table is created.
pub const RESET_SEQUENCE: &str = "DELETE FROM sqlite_sequence WHERE name = 'jrphistory'";
