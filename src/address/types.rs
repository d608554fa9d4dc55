use std::fmt;

use super::{AddressError, CATCHALL_MARKER, split_address};

/// A concrete `user@domain` pair: mailboxes and alias destinations.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mailbox {
    pub user: String,
    pub domain: String,
}

impl Mailbox {
    pub fn new(user: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            domain: domain.into(),
        }
    }

    /// `*` n'a pas de sens spécial ici, il reste un local-part littéral.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let (user, domain) = split_address(address)?;
        Ok(Self::new(user, domain))
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.domain)
    }
}

/// Local-part of an alias source. `Catchall` is stored as SQL `NULL`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceLocal {
    Catchall,
    Local(String),
}

impl SourceLocal {
    pub fn from_text(local: &str) -> Self {
        if local == CATCHALL_MARKER {
            Self::Catchall
        } else {
            Self::Local(local.to_string())
        }
    }

    /// Column value: `None` for the catchall.
    pub fn as_column(&self) -> Option<&str> {
        match self {
            Self::Catchall => None,
            Self::Local(local) => Some(local.as_str()),
        }
    }

    pub fn from_column(value: Option<String>) -> Self {
        match value {
            Some(local) => Self::Local(local),
            None => Self::Catchall,
        }
    }

    /// Display key; the catchall is shown as `*`.
    pub fn key(&self) -> &str {
        self.as_column().unwrap_or(CATCHALL_MARKER)
    }

    pub fn is_catchall(&self) -> bool {
        matches!(self, Self::Catchall)
    }
}

impl fmt::Display for SourceLocal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceAddress {
    pub local: SourceLocal,
    pub domain: String,
}

impl SourceAddress {
    pub fn new(local: SourceLocal, domain: impl Into<String>) -> Self {
        Self {
            local,
            domain: domain.into(),
        }
    }

    pub fn catchall(domain: impl Into<String>) -> Self {
        Self::new(SourceLocal::Catchall, domain)
    }

    /// `"*"` still means the catchall here.
    pub fn local(local: &str, domain: impl Into<String>) -> Self {
        Self::new(SourceLocal::from_text(local), domain)
    }

    /// Parses an alias source; `*@domain` becomes [`SourceLocal::Catchall`].
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let (local, domain) = split_address(address)?;
        Ok(Self::new(SourceLocal::from_text(local), domain))
    }
}

impl fmt::Display for SourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}
