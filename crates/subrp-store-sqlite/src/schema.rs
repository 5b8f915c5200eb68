//! SQL schema for the subscription SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per subscription. A PUT replaces every payload column in a single
-- statement; the id never changes.
CREATE TABLE IF NOT EXISTS subscriptions (
    id                TEXT PRIMARY KEY,   -- hyphenated lowercase UUID
    state             TEXT NOT NULL,      -- SubscriptionState wire name
    registration_date TEXT NOT NULL CHECK (registration_date != ''),
    properties_json   TEXT                -- opaque JSON or NULL
);

PRAGMA user_version = 1;
";
