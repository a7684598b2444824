//! Tokenizer for the encoded hash grammar:
//!
//! ```text
//! "$argon2id$v=" DIGITS "$m=" DIGITS ",t=" DIGITS ",p=" DIGITS "$" SALT "$" KEY
//! ```
//!
//! `SALT` runs up to the next `$` and `KEY` is the remainder; both must be
//! non-empty canonical base64.

use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use zeroize::Zeroizing;

use super::{ALGORITHM, VERSION};
use crate::crypto::Params;
use crate::error::{Error, Result};

/// Raw segments of an encoded hash, before any conversion.
struct Segments<'a> {
    version: &'a str,
    memory: &'a str,
    time: &'a str,
    parallelism: &'a str,
    salt: &'a str,
    key: &'a str,
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn literal(&mut self, lit: &str) -> Result<()> {
        self.rest = self
            .rest
            .strip_prefix(lit)
            .ok_or(Error::InvalidEncodedHash)?;
        Ok(())
    }

    fn digits(&mut self) -> Result<&'a str> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        self.take(end)
    }

    fn until(&mut self, delim: char) -> Result<&'a str> {
        let end = self.rest.find(delim).unwrap_or(self.rest.len());
        self.take(end)
    }

    fn remainder(&mut self) -> Result<&'a str> {
        self.take(self.rest.len())
    }

    fn take(&mut self, end: usize) -> Result<&'a str> {
        if end == 0 {
            return Err(Error::InvalidEncodedHash);
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(token)
    }
}

fn tokenize(input: &str) -> Result<Segments<'_>> {
    let mut cur = Cursor::new(input);

    cur.literal("$")?;
    cur.literal(ALGORITHM)?;
    cur.literal("$v=")?;
    let version = cur.digits()?;
    cur.literal("$m=")?;
    let memory = cur.digits()?;
    cur.literal(",t=")?;
    let time = cur.digits()?;
    cur.literal(",p=")?;
    let parallelism = cur.digits()?;
    cur.literal("$")?;
    let salt = cur.until('$')?;
    cur.literal("$")?;
    let key = cur.remainder()?;

    Ok(Segments {
        version,
        memory,
        time,
        parallelism,
        salt,
        key,
    })
}

fn number(digits: &str) -> Result<u32> {
    digits.parse().map_err(|_| Error::InvalidEncodedHash)
}

fn base64(segment: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(segment)
        .map_err(|_| Error::InvalidEncodedHash)
}

pub(super) fn parse(input: &str) -> Result<(Zeroizing<Vec<u8>>, Params)> {
    let seg = tokenize(input)?;

    let version = number(seg.version)?;
    if version != VERSION {
        return Err(Error::VersionMismatch {
            found: version,
            expected: VERSION,
        });
    }

    let mem_cost_kib = number(seg.memory)?;
    let time_cost = number(seg.time)?;
    let parallelism = number(seg.parallelism)?;

    let salt = base64(seg.salt)?;
    let key = Zeroizing::new(base64(seg.key)?);
    let key_len = u32::try_from(key.len()).map_err(|_| Error::InvalidEncodedHash)?;

    Ok((
        key,
        Params {
            salt,
            time_cost,
            mem_cost_kib,
            parallelism,
            key_len,
        },
    ))
}
