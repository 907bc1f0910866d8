//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Column names preserve the storage layout this store inherited, so an
/// existing database file keeps working: `lastaction_ts`, `firsttime_ts`,
/// `adminstatus`, `joinstatus`, `mutestatus`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Non-privileged identities. No operations are defined over this table
-- yet; it exists so guests can accumulate history from day one.
CREATE TABLE IF NOT EXISTS guest (
    id            TEXT PRIMARY KEY,
    nickname      TEXT NOT NULL DEFAULT '',
    lastaction_ts TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS crew (
    id            TEXT PRIMARY KEY,
    nickname      TEXT NOT NULL DEFAULT '',
    grade         INTEGER NOT NULL DEFAULT 1,  -- CrewGrade code; 1 = seaman
    lastaction_ts TEXT NOT NULL                -- ISO 8601 UTC; store-assigned
);

CREATE TABLE IF NOT EXISTS party (
    id                   TEXT PRIMARY KEY,
    status               INTEGER NOT NULL DEFAULT 1,  -- PartyStatus code; 1 = nonmanaged
    timezone             TEXT NOT NULL DEFAULT 'UTC',
    locale               TEXT NOT NULL DEFAULT 'en',
    authorized_charsets  TEXT NOT NULL DEFAULT '',
    authorized_languages TEXT NOT NULL DEFAULT '',
    lastaction_ts        TEXT NOT NULL
);

-- One row per (user, party) pair. Created on first observation of the
-- user in the party; only ever updated in place afterwards.
CREATE TABLE IF NOT EXISTS whoiswhere (
    uid           TEXT NOT NULL,
    cid           TEXT NOT NULL REFERENCES party(id) ON DELETE CASCADE,
    firsttime_ts  TEXT NOT NULL,   -- set once at creation
    lastaction_ts TEXT NOT NULL,
    adminstatus   INTEGER NOT NULL DEFAULT 0,
    joinstatus    INTEGER NOT NULL DEFAULT 0,
    mutestatus    INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (uid, cid)
);

CREATE INDEX IF NOT EXISTS guest_lastaction_idx      ON guest(lastaction_ts);
CREATE INDEX IF NOT EXISTS crew_lastaction_idx       ON crew(lastaction_ts);
CREATE INDEX IF NOT EXISTS party_lastaction_idx      ON party(lastaction_ts);
CREATE INDEX IF NOT EXISTS whoiswhere_uid_idx        ON whoiswhere(uid);
CREATE INDEX IF NOT EXISTS whoiswhere_cid_idx        ON whoiswhere(cid);
CREATE INDEX IF NOT EXISTS whoiswhere_firsttime_idx  ON whoiswhere(firsttime_ts);
CREATE INDEX IF NOT EXISTS whoiswhere_lastaction_idx ON whoiswhere(lastaction_ts);

PRAGMA user_version = 1;
";
