//! Constant-time byte comparison.
//!
//! Every byte of the longer input is visited and differences are OR-ed into
//! an accumulator, so the running time does not depend on where the inputs
//! first differ.

use std::hint::black_box;

/// Returns `true` if `a == b`, without exiting early on the first mismatch.
///
/// A length mismatch is folded into the accumulator instead of returning
/// immediately.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = (a.len() ^ b.len()) as u64;

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= black_box(u64::from(x ^ y));
    }

    // 1 when diff == 0, else 0, without a data-dependent branch
    let is_zero = ((diff | diff.wrapping_neg()) >> 63) ^ 1;
    black_box(is_zero) == 1
}
