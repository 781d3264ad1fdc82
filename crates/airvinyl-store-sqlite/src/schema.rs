//! SQL schema for the AirVinyl SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    email                          TEXT,
    first_name                     TEXT,
    last_name                      TEXT,
    date_of_birth                  TEXT,   -- ISO 8601 date
    gender                         TEXT,   -- 'Female' | 'Male' | 'Other'
    number_of_records_on_wish_list INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS vinyl_records (
    vinyl_record_id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id       INTEGER NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    title           TEXT NOT NULL,
    artist          TEXT NOT NULL,
    catalog_number  TEXT,
    year            INTEGER
);

-- Base and specialized stores share one table; a NULL specialization is
-- the base variant.
CREATE TABLE IF NOT EXISTS record_stores (
    record_store_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    store_address   TEXT,                      -- JSON-encoded Address or NULL
    tags            TEXT NOT NULL DEFAULT '[]', -- JSON array, sorted, unique
    specialization  TEXT
);

-- Ratings are only inserted or deleted through a unit-of-work commit.
CREATE TABLE IF NOT EXISTS ratings (
    rating_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    record_store_id INTEGER NOT NULL REFERENCES record_stores(record_store_id) ON DELETE CASCADE,
    person_id       INTEGER NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    value           INTEGER NOT NULL CHECK (value BETWEEN 1 AND 5)
);

CREATE INDEX IF NOT EXISTS vinyl_records_person_idx ON vinyl_records(person_id);
CREATE INDEX IF NOT EXISTS ratings_store_idx        ON ratings(record_store_id);
CREATE INDEX IF NOT EXISTS ratings_person_idx       ON ratings(person_id);

PRAGMA user_version = 1;
";
