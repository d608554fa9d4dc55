//! SQLite-backed directory of domains, mailboxes and aliases.
//!
//! Every mutation is one statement or one explicit transaction. Nothing is
//! cached: reads always go back to the database.

mod accounts;
mod aliases;
mod domains;
mod error;
mod options;
mod schema;
mod types;

pub use error::{Entity, StoreError};
pub use options::StoreOptions;
pub use types::{Account, Alias, AliasChange, Domain, DomainRemoval, NewAccount, NewAlias};

pub(crate) use accounts::account_from_row;
pub(crate) use aliases::alias_from_row;
pub(crate) use domains::domain_from_row;

use std::path::Path;

use rusqlite::Connection;

pub struct Directory {
    conn: Connection,
}

impl Directory {
    /// Opens (or creates) the SQLite database at `path`.
    pub fn open(path: impl AsRef<Path>, options: &StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(StoreError::during("opening database"))?;
        tracing::debug!(path = %path.display(), "database opened");
        Self::with_connection(conn, options)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(StoreError::during("opening database"))?;
        Self::with_connection(conn, &StoreOptions::default())
    }

    fn with_connection(conn: Connection, options: &StoreOptions) -> Result<Self, StoreError> {
        if let Some(timeout) = options.timeout() {
            conn.busy_timeout(timeout)
                .map_err(StoreError::during("configuring connection"))?;
        }
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(StoreError::during("configuring connection"))?;
        if options.create_schema {
            schema::ensure(&conn).map_err(StoreError::during("creating schema"))?;
        }
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}
