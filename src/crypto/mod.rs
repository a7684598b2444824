//! Cryptographic primitives for password hashing.
//!
//! Provides salt generation, Argon2id key derivation and constant-time comparison.

pub mod ct;
pub mod kdf;
pub mod salt;

pub use ct::ct_eq;
pub use kdf::{HashConfig, Params, derive_key};
pub use salt::generate_salt;

/// Length of the salt generated by [`crate::hash`] (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the derived key produced by [`crate::hash`] (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Default Argon2 memory cost in KiB (64 MiB).
pub const MEM_COST_KIB: u32 = 64 * 1024;
/// Default Argon2 time cost (iterations).
pub const TIME_COST: u32 = 1;

/// Smallest salt Argon2 accepts.
pub const MIN_SALT_LEN: usize = argon2::MIN_SALT_LEN;
/// Smallest key Argon2 can output.
pub const MIN_KEY_LEN: usize = argon2::Params::MIN_OUTPUT_LEN;
