//! SQL schema for the medtrack SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patients (
    patient_id   TEXT PRIMARY KEY,
    username     TEXT NOT NULL UNIQUE,
    caregiver_id TEXT             -- NULL when nobody monitors this patient
);

-- The prescription plan. Read-only to the engine once written.
CREATE TABLE IF NOT EXISTS reminders (
    reminder_id TEXT PRIMARY KEY,
    patient_id  TEXT NOT NULL REFERENCES patients(patient_id),
    drug_name   TEXT NOT NULL,
    dosage      TEXT NOT NULL,
    frequency   TEXT NOT NULL,              -- 'daily' | 'twice_daily' | 'weekly'
    times       TEXT NOT NULL DEFAULT '[]', -- JSON array of HH:MM strings
    duration    TEXT,
    reason      TEXT,
    created_at  TEXT NOT NULL               -- ISO 8601 UTC; server-assigned
);

-- One row per (reminder, logical day). Later writes overwrite the status;
-- the composite key is what enforces the one-record-per-day invariant.
CREATE TABLE IF NOT EXISTS adherence (
    reminder_id TEXT NOT NULL REFERENCES reminders(reminder_id),
    date        TEXT NOT NULL,   -- YYYY-MM-DD (logical day)
    status      TEXT NOT NULL,   -- 'taken' | 'missed'
    PRIMARY KEY (reminder_id, date)
);

CREATE INDEX IF NOT EXISTS reminders_patient_idx  ON reminders(patient_id);
CREATE INDEX IF NOT EXISTS patients_caregiver_idx ON patients(caregiver_id);

PRAGMA user_version = 1;
";
