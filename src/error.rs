use thiserror::Error;

/// Errors produced while hashing, encoding or decoding passwords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The string does not follow the `$argon2id$v=..$m=..,t=..,p=..$salt$key` grammar.
    #[error("invalid encoded hash")]
    InvalidEncodedHash,

    /// The string is well formed but was produced by another Argon2 revision.
    #[error("argon2 version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    /// The OS random generator could not provide salt bytes.
    #[error("OS random generator unavailable")]
    RandomSource,

    /// Argon2 rejected the cost parameters or lengths.
    #[error("argon2 key derivation failed: {0}")]
    KeyDerivation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
