//! Splitting of `local@domain` strings.
//!
//! [`split_address`] only checks the shape of the input. The catchall marker
//! is translated by [`SourceAddress::parse`], never by the splitter itself,
//! so the same code path serves alias destinations and mailboxes.

mod error;
mod types;

pub use error::AddressError;
pub use types::{Mailbox, SourceAddress, SourceLocal};

/// Local-part reserved for catchall alias sources.
pub const CATCHALL_MARKER: &str = "*";

pub fn split_address(address: &str) -> Result<(&str, &str), AddressError> {
    let mut parts = address.split('@');
    let (Some(user), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AddressError::invalid(address));
    };

    if user.is_empty() {
        return Err(AddressError::empty_user(address));
    }
    if domain.is_empty() {
        return Err(AddressError::empty_domain(address));
    }

    Ok((user, domain))
}

#[cfg(test)]
mod tests;
