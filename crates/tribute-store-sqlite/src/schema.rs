//! SQL schema for the Tribute SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` preserves roster insertion order for listing.
CREATE TABLE IF NOT EXISTS employees (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id   TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    email         TEXT,
    date_of_birth TEXT NOT NULL,   -- YYYY-MM-DD
    start_date    TEXT NOT NULL,   -- YYYY-MM-DD
    leaving_date  TEXT             -- YYYY-MM-DD or NULL
);

-- Keyed by the deterministic event id; projected events themselves are
-- never stored.
CREATE TABLE IF NOT EXISTS event_states (
    event_id         TEXT PRIMARY KEY,
    status           TEXT NOT NULL,   -- 'upcoming' | 'pending_action' | 'completed'
    selected_gift_id TEXT,
    card_id          TEXT,
    updated_at       TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
