use std::fmt;

use crate::address::{Mailbox, SourceLocal};
use crate::store::{Account, Domain};

/// One destination of a source, with its own flags.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDestination {
    pub id: i64,
    pub address: Mailbox,
    pub enabled: bool,
    pub blacklisted: bool,
}

impl fmt::Display for AliasDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        write!(f, "{} [{state}", self.address)?;
        if self.blacklisted {
            f.write_str(", blacklisted")?;
        }
        f.write_str("]")
    }
}

/// Aliases sharing the same source local-part.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub source: SourceLocal,
    pub domain: String,
    pub destinations: Vec<AliasDestination>,
}

impl AliasGroup {
    /// `*` for the catchall group, the local-part otherwise.
    pub fn key(&self) -> &str {
        self.source.key()
    }
}

impl fmt::Display for AliasGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ->", self.key(), self.domain)?;
        for (i, dest) in self.destinations.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{dest}")?;
        }
        Ok(())
    }
}

/// Everything `show` prints for a domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: Domain,
    pub accounts: Vec<Account>,
    pub aliases: Vec<AliasGroup>,
}
