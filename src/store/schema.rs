use rusqlite::Connection;

// NULL != NULL pour UNIQUE : l'index passe par IFNULL pour que deux catchalls
// vers la même destination entrent en collision.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS domains (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    domain  TEXT NOT NULL UNIQUE CHECK (domain <> '')
);

CREATE TABLE IF NOT EXISTS accounts (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    username  TEXT NOT NULL,
    domain    TEXT NOT NULL REFERENCES domains (domain),
    password  TEXT NOT NULL DEFAULT '',
    quota     INTEGER NOT NULL DEFAULT 0 CHECK (quota >= 0),
    enabled   INTEGER NOT NULL DEFAULT 0,
    sendonly  INTEGER NOT NULL DEFAULT 0,
    UNIQUE (username, domain)
);

CREATE TABLE IF NOT EXISTS aliases (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    source_username       TEXT,
    source_domain         TEXT NOT NULL REFERENCES domains (domain),
    destination_username  TEXT NOT NULL,
    destination_domain    TEXT NOT NULL,
    enabled               INTEGER NOT NULL DEFAULT 0,
    blacklisted           INTEGER NOT NULL DEFAULT 0
);

CREATE UNIQUE INDEX IF NOT EXISTS aliases_source_destination ON aliases (
    IFNULL(source_username, ''),
    source_domain,
    destination_username,
    destination_domain
);

CREATE INDEX IF NOT EXISTS aliases_source_domain ON aliases (source_domain);
"#;

/// Creates the three tables when missing. Safe to run on every open.
pub(crate) fn ensure(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
