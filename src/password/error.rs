use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password is way too short ({len} < {min} characters)")]
    TooShort { len: usize, min: usize },
    #[error("passwords do not match")]
    Mismatch,
    #[error("hash is invalid (does not start with '{{SHA512-CRYPT}}$6$')")]
    InvalidHashFormat,
    #[error("computing password hash failed: {reason}")]
    Hashing { reason: String },
}

impl PasswordError {
    pub(crate) fn hashing(reason: impl Into<String>) -> Self {
        Self::Hashing {
            reason: reason.into(),
        }
    }
}
