//! Read side: listings and the per-domain report.

mod group;
mod queries;
mod types;

pub use group::group_aliases;
pub use types::{AliasDestination, AliasGroup, DomainReport};

#[cfg(test)]
mod tests;
