use crate::error::{Error, Result};
use getrandom::fill;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|e| {
        tracing::warn!(error = %e, "OS random generator unavailable");
        Error::RandomSource
    })
}

/// Generate a salt of `len` random bytes.
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}
