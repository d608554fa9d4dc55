use crate::address::{Mailbox, SourceAddress, SourceLocal};
use crate::password::PasswordHash;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: i64,
    pub name: String,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub domain: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing, default))]
    pub password: String,
    /// Bytes; `0` means unlimited.
    pub quota: u64,
    pub enabled: bool,
    pub send_only: bool,
}

impl Account {
    pub fn mailbox(&self) -> Mailbox {
        Mailbox::new(self.username.clone(), self.domain.clone())
    }

    pub fn has_quota(&self) -> bool {
        self.quota > 0
    }
}

/// Input of [`Directory::create_account`](super::Directory::create_account).
/// New accounts are always created enabled.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub mailbox: Mailbox,
    pub password: PasswordHash,
    pub quota: u64,
    pub send_only: bool,
}

impl NewAccount {
    pub fn new(mailbox: Mailbox, password: PasswordHash) -> Self {
        Self {
            mailbox,
            password,
            quota: 0,
            send_only: false,
        }
    }

    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = quota;
        self
    }

    pub fn send_only(mut self, send_only: bool) -> Self {
        self.send_only = send_only;
        self
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub id: i64,
    pub source: SourceLocal,
    pub source_domain: String,
    pub destination: Mailbox,
    pub enabled: bool,
    pub blacklisted: bool,
}

impl Alias {
    pub fn source_address(&self) -> SourceAddress {
        SourceAddress::new(self.source.clone(), self.source_domain.clone())
    }
}

/// One (source, destination) forwarding rule to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlias {
    pub source: SourceAddress,
    pub destination: Mailbox,
}

impl NewAlias {
    pub fn new(source: SourceAddress, destination: Mailbox) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Flag values applied to every row sharing a source. `None` leaves the
/// column untouched.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AliasChange {
    pub enabled: Option<bool>,
    pub blacklisted: Option<bool>,
}

impl AliasChange {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.blacklisted.is_none()
    }

    pub fn apply(&self, alias: &mut Alias) {
        if let Some(enabled) = self.enabled {
            alias.enabled = enabled;
        }
        if let Some(blacklisted) = self.blacklisted {
            alias.blacklisted = blacklisted;
        }
    }
}

/// Rows removed by [`Directory::delete_domain`](super::Directory::delete_domain),
/// besides the domain row itself.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainRemoval {
    pub accounts: usize,
    pub aliases: usize,
}

impl DomainRemoval {
    pub fn total_rows(&self) -> usize {
        self.accounts + self.aliases + 1
    }
}
