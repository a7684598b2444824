//! PHC-style string encoding of Argon2id hashes.
//!
//! Encoded form:
//! ```text
//! $argon2id$v=19$m=<memory KiB>,t=<iterations>,p=<parallelism>$<salt>$<key>
//! ```
//! Salt and key are standard-alphabet base64 without padding.

use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use zeroize::Zeroizing;

use crate::crypto::Params;
use crate::error::Result;

mod parser;

/// Algorithm identifier written in the first segment.
pub const ALGORITHM: &str = "argon2id";
/// Argon2 revision this crate derives with and accepts (0x13).
pub const VERSION: u32 = argon2::Version::V0x13 as u32;

/// Formats `key` and the parameters that produced it as a PHC string.
pub fn encode(key: &[u8], params: &Params) -> String {
    format!(
        "${ALGORITHM}$v={VERSION}$m={},t={},p={}${}${}",
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        STANDARD_NO_PAD.encode(&params.salt),
        STANDARD_NO_PAD.encode(key),
    )
}

/// Parses a PHC string back into its key and parameters.
///
/// `key_len` of the returned parameters is the length of the decoded key.
///
/// # Errors
///
/// Returns:
/// - [`Error::InvalidEncodedHash`](crate::Error::InvalidEncodedHash) if the
///   string does not follow the grammar or a base64 segment is not canonical
/// - [`Error::VersionMismatch`](crate::Error::VersionMismatch) if it was
///   produced by another Argon2 revision
pub fn decode(s: &str) -> Result<(Zeroizing<Vec<u8>>, Params)> {
    parser::parse(s)
}
