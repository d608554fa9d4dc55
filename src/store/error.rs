use std::fmt;

use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

/// Kind of row a [`StoreError::NotFound`] refers to.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Domain,
    Mailbox,
    Alias,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domain => "domain",
            Self::Mailbox => "mailbox",
            Self::Alias => "alias",
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("domain name is empty")]
    EmptyName,
    #[error("domain {name} already exists")]
    DuplicateName { name: String },
    #[error("mailbox {mailbox} already exists")]
    DuplicateMailbox { mailbox: String },
    #[error("alias {alias} -> {destination} already exists")]
    DuplicateAlias { alias: String, destination: String },
    #[error("domain {domain} does not exist")]
    UnknownDomain { domain: String },
    #[error("{entity} {key} not found")]
    NotFound { entity: Entity, key: String },
    #[error("quota {quota} is out of range")]
    QuotaOutOfRange { quota: u64 },
    #[error("store unavailable while {context}: {source}")]
    Unavailable {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub(crate) fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn unavailable(context: &'static str, source: rusqlite::Error) -> Self {
        Self::Unavailable { context, source }
    }

    /// Adapter for [`map_err`](Result::map_err) on plain queries.
    pub(crate) fn during(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::unavailable(context, source)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
}

/// Classe une violation de contrainte d'après le code étendu SQLite.
pub(crate) fn constraint_of(err: &rusqlite::Error) -> Option<Constraint> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }
    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(Constraint::Unique)
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
        _ => None,
    }
}
