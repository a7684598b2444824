//! Argon2id password hashing with self-describing PHC-style strings.
//!
//! ```no_run
//! let encoded = hashnest::hash("correct horse battery staple")?;
//! assert!(hashnest::verify("correct horse battery staple", &encoded));
//! assert!(!hashnest::verify("wrong password", &encoded));
//! # Ok::<(), hashnest::Error>(())
//! ```

mod crypto;
mod error;
mod format;

pub use crate::crypto::{
    HashConfig, KEY_LEN, MEM_COST_KIB, Params, SALT_LEN, TIME_COST, ct_eq, generate_salt,
};
pub use crate::error::{Error, Result};
pub use crate::format::{ALGORITHM, VERSION, decode, encode};

/// Hashes `password` with a fresh 16-byte salt and the default costs
/// (`t=1`, `m=65536`, `p=` available parallelism, 32-byte key).
pub fn hash(password: &str) -> Result<String> {
    hash_with(password, &HashConfig::default())
}

/// Hashes `password` with a fresh salt and the costs in `config`.
pub fn hash_with(password: &str, config: &HashConfig) -> Result<String> {
    config.validate()?;

    let salt = crypto::generate_salt(config.salt_len())?;
    let params = config.params(salt);

    tracing::debug!(
        m = params.mem_cost_kib,
        t = params.time_cost,
        p = params.parallelism,
        key_len = params.key_len,
        "hashing password"
    );

    let key = crypto::derive_key(password, &params)?;
    Ok(format::encode(&key, &params))
}

/// Returns `true` if `password` matches `encoded`.
///
/// Malformed hashes, foreign versions and rejected parameters all yield
/// `false`, the same as a wrong password.
pub fn verify(password: &str, encoded: &str) -> bool {
    match verify_detailed(password, encoded) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::debug!(error = %e, "password verification failed");
            false
        }
    }
}

/// Like [`verify`], but reports why a hash could not be checked.
///
/// Returns `Ok(false)` only for a well-formed hash and a wrong password.
pub fn verify_detailed(password: &str, encoded: &str) -> Result<bool> {
    let (stored, params) = format::decode(encoded)?;

    tracing::debug!(
        m = params.mem_cost_kib,
        t = params.time_cost,
        p = params.parallelism,
        key_len = params.key_len,
        "verifying password"
    );

    let derived = crypto::derive_key(password, &params)?;
    Ok(crypto::ct_eq(&stored, &derived))
}
