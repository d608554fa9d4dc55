#![forbid(unsafe_code)]
//! vmail_lib — annuaire de messagerie virtuelle (domaines, boîtes, alias)

pub mod address;
pub mod password;
pub mod report;
pub mod store;

pub use address::{AddressError, CATCHALL_MARKER, Mailbox, SourceAddress, SourceLocal, split_address};
pub use password::{
    HASH_PREFIX, PasswordError, PasswordHash, PasswordInput, PasswordPolicy, check_hash,
    confirm_password, hash_password,
};
pub use report::{AliasDestination, AliasGroup, DomainReport, group_aliases};
pub use store::{
    Account, Alias, AliasChange, Directory, Domain, DomainRemoval, Entity, NewAccount, NewAlias,
    StoreError, StoreOptions,
};
