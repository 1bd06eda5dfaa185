//! Initial table creation.
//!
//! Statements are executed one at a time; PostgreSQL rejects several
//! statements in one prepared query.

/// SQLite schema.
pub const SQLITE_SCHEMA: [&str; 2] = [
    r"
    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT    NOT NULL,
        email       TEXT    NOT NULL,
        age         INTEGER NOT NULL CHECK (age BETWEEN 1 AND 120),
        status      TEXT    NOT NULL DEFAULT 'active',
        created_at  TEXT    NOT NULL,
        updated_at  TEXT    NOT NULL,
        deleted_at  TEXT
    )
    ",
    r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email_active
        ON users (email) WHERE status = 'active'
    ",
];

/// PostgreSQL schema.
pub const POSTGRES_SCHEMA: [&str; 2] = [
    r"
    CREATE TABLE IF NOT EXISTS users (
        id          BIGSERIAL   PRIMARY KEY,
        name        TEXT        NOT NULL,
        email       TEXT        NOT NULL,
        age         INTEGER     NOT NULL CHECK (age BETWEEN 1 AND 120),
        status      TEXT        NOT NULL DEFAULT 'active',
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL,
        deleted_at  TIMESTAMPTZ
    )
    ",
    r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email_active
        ON users (email) WHERE status = 'active'
    ",
];
