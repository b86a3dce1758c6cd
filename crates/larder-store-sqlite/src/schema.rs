//! SQL schema for the larder SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Main rows and shadow drafts live in the same table. A published row's
-- pending edit is a separate draft row referenced through draft_id.
CREATE TABLE IF NOT EXISTS recipes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    status        TEXT,            -- 'draft' | 'published' | 'archived'
    name          TEXT NOT NULL,
    summary       TEXT,
    instructions  TEXT NOT NULL DEFAULT '',
    prep_minutes  INTEGER,
    cook_minutes  INTEGER,
    servings      INTEGER,
    tags          TEXT NOT NULL DEFAULT '[]',
    draft_id      INTEGER REFERENCES recipes(id) ON DELETE SET NULL,
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at    TEXT NOT NULL
);

-- A shadow draft belongs to at most one main row. SQLite treats NULLs as
-- distinct, so unlinked rows do not collide.
CREATE UNIQUE INDEX IF NOT EXISTS recipes_draft_idx  ON recipes(draft_id);
CREATE INDEX        IF NOT EXISTS recipes_status_idx ON recipes(status);

PRAGMA user_version = 1;
";
