//! Password hashing and stored-hash validation.
//!
//! Every stored hash is `{SHA512-CRYPT}` followed by the crypt(3) string.
//! A [`PasswordHash`] can only be built through this module, so the store
//! never sees a string that skipped validation unless the caller asked for
//! it with [`PasswordHash::raw`].

mod error;
mod policy;

pub use error::PasswordError;
pub use policy::{PasswordPolicy, SHA512_DEFAULT_ROUNDS, SHA512_MAX_SALT_LEN};

use std::fmt;

use pwhash::{HashSetup, sha512_crypt};
use rand::Rng;

pub const HASH_TAG: &str = "{SHA512-CRYPT}";
pub const HASH_PREFIX: &str = "{SHA512-CRYPT}$6$";

const SALT_ALPHABET: &[u8] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// A hash ready to be written to the `password` column.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_cleartext(password: &str, policy: &PasswordPolicy) -> Result<Self, PasswordError> {
        let hash = hash_password(password, policy)?;
        Self::parse(hash)
    }

    /// Accepts an already hashed value after checking its prefix.
    pub fn parse(hash: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = hash.into();
        check_hash(&hash)?;
        Ok(Self(hash))
    }

    /// Skips validation. Only for hashes imported from another system.
    pub fn raw(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// pas de fuite du hash dans les logs
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// How the operator supplied the password.
#[derive(Clone)]
pub enum PasswordInput {
    Cleartext(String),
    Hashed(String),
    RawHash(String),
}

impl fmt::Debug for PasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cleartext(_) => "Cleartext(..)",
            Self::Hashed(_) => "Hashed(..)",
            Self::RawHash(_) => "RawHash(..)",
        })
    }
}

impl PasswordInput {
    pub fn into_hash(self, policy: &PasswordPolicy) -> Result<PasswordHash, PasswordError> {
        match self {
            Self::Cleartext(password) => PasswordHash::from_cleartext(&password, policy),
            Self::Hashed(hash) => PasswordHash::parse(hash),
            Self::RawHash(hash) => Ok(PasswordHash::raw(hash)),
        }
    }
}

pub fn check_length(password: &str, policy: &PasswordPolicy) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < policy.min_length {
        return Err(PasswordError::TooShort {
            len,
            min: policy.min_length,
        });
    }
    Ok(())
}

/// Compares the two interactive entries, then applies the length rule.
pub fn confirm_password(
    first: String,
    second: &str,
    policy: &PasswordPolicy,
) -> Result<String, PasswordError> {
    if first != second {
        return Err(PasswordError::Mismatch);
    }
    check_length(&first, policy)?;
    Ok(first)
}

pub fn check_hash(hash: &str) -> Result<(), PasswordError> {
    if !hash.starts_with(HASH_PREFIX) {
        return Err(PasswordError::InvalidHashFormat);
    }
    Ok(())
}

/// Returns the tagged hash of `password` with a fresh salt.
/// Passwords shorter than the policy minimum are refused.
pub fn hash_password(password: &str, policy: &PasswordPolicy) -> Result<String, PasswordError> {
    check_length(password, policy)?;
    let salt = generate_salt(policy.effective_salt_length());
    let setup = HashSetup {
        salt: Some(salt.as_str()),
        rounds: Some(policy.rounds),
    };
    let crypted = sha512_crypt::hash_with(setup, password)
        .map_err(|err| PasswordError::hashing(err.to_string()))?;
    Ok(format!("{HASH_TAG}{crypted}"))
}

fn generate_salt(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}
