#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Nombre de tours par défaut de SHA512-CRYPT.
pub const SHA512_DEFAULT_ROUNDS: u32 = 5_000;

/// Longueur maximale du sel acceptée par l'algorithme.
pub const SHA512_MAX_SALT_LEN: usize = 16;

/// Knobs for hashing cleartext passwords.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub salt_length: usize,
    pub rounds: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            salt_length: SHA512_MAX_SALT_LEN,
            rounds: SHA512_DEFAULT_ROUNDS * 10,
        }
    }
}

impl PasswordPolicy {
    /// Salt length clamped to what SHA512-CRYPT can use.
    pub fn effective_salt_length(&self) -> usize {
        self.salt_length.clamp(1, SHA512_MAX_SALT_LEN)
    }
}
