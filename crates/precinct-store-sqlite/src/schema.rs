//! SQL schema for the Precinct SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    role        TEXT NOT NULL,   -- 'admin' | 'resident'
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS societies (
    society_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    admin_id    TEXT REFERENCES users(user_id),   -- NULL = unassigned
    created_at  TEXT NOT NULL
);

-- One admin per society is structural (single column); one society per
-- admin is this index.
CREATE UNIQUE INDEX IF NOT EXISTS societies_admin_uidx
    ON societies(admin_id) WHERE admin_id IS NOT NULL;

CREATE TABLE IF NOT EXISTS announcements (
    announcement_id TEXT PRIMARY KEY,
    society_id      TEXT REFERENCES societies(society_id) ON DELETE CASCADE,
    title           TEXT NOT NULL,
    body            TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS announcements_created_idx ON announcements(created_at);

PRAGMA user_version = 1;
";
