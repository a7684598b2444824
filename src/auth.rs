//! Password input for the `hashnest` binary.
//!
//! Sources, in order: `HASHNEST_PASSWORD`, one line of piped stdin, then an
//! interactive prompt. Empty passwords are refused here even though the
//! library hashes them.

use anyhow::{Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "HASHNEST_PASSWORD";

/// Password to check against an existing hash.
pub fn read_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = non_interactive()? {
        return Ok(pw);
    }
    non_empty(Zeroizing::new(rpassword::prompt_password("Password: ")?))
}

/// Password for a new hash; an interactive user types it twice.
pub fn read_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = non_interactive()? {
        return Ok(pw);
    }

    let pw = non_empty(Zeroizing::new(rpassword::prompt_password("New password: ")?))?;
    let confirm = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);
    if *pw != *confirm {
        bail!("passwords do not match");
    }
    Ok(pw)
}

/// Env var or piped stdin; `Ok(None)` when a TTY prompt should follow.
fn non_interactive() -> Result<Option<Zeroizing<String>>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Some(Zeroizing::new(pw)));
        }
    }

    if io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buf = Zeroizing::new(String::new());
    io::stdin().read_line(&mut buf)?;
    trim_newline(&mut buf);
    non_empty(buf).map(Some)
}

fn non_empty(pw: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if pw.is_empty() {
        bail!("empty password: set {PASSWORD_ENV}, pipe it on stdin or type it at the prompt");
    }
    Ok(pw)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
