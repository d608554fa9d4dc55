use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid email address {address:?} (must contain exactly one '@')")]
    InvalidAddress { address: String },
    #[error("invalid email address {address:?} (user part is empty)")]
    EmptyUser { address: String },
    #[error("invalid email address {address:?} (domain part is empty)")]
    EmptyDomain { address: String },
}

impl AddressError {
    pub(crate) fn invalid(address: &str) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
        }
    }

    pub(crate) fn empty_user(address: &str) -> Self {
        Self::EmptyUser {
            address: address.to_string(),
        }
    }

    pub(crate) fn empty_domain(address: &str) -> Self {
        Self::EmptyDomain {
            address: address.to_string(),
        }
    }
}
