//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from the OS CSPRNG via `getrandom`. Each symbol
//! is picked by rejection sampling so that all 62 symbols are exactly
//! equiprobable.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Symbols used for generated codes: digits, uppercase, lowercase.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes. 62^7 is roughly 3.5e12 possible codes.
pub const CODE_LENGTH: usize = 7;

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// discarded so that `byte % 62` is uniform.
const ACCEPT_BELOW: u8 = (256u16 / 62 * 62) as u8;

/// Pattern for client-supplied short codes.
static SHORT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("valid short_name pattern"));

/// Generates a random [`CODE_LENGTH`]-symbol code.
///
/// # Errors
///
/// Returns an error if the system random number generator is unavailable.
pub fn generate_code() -> Result<String, getrandom::Error> {
    generate_code_with_len(CODE_LENGTH)
}

/// Generates a random code of `len` symbols over [`ALPHABET`].
pub fn generate_code_with_len(len: usize) -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(len);
    let mut buffer = [0u8; 16];

    while code.len() < len {
        getrandom::fill(&mut buffer)?;

        for &byte in &buffer {
            if byte >= ACCEPT_BELOW {
                continue;
            }
            code.push(ALPHABET[(byte % 62) as usize] as char);
            if code.len() == len {
                break;
            }
        }
    }

    Ok(code)
}

/// Returns true if `code` is a well-formed short code.
pub fn is_valid_short_name(code: &str) -> bool {
    SHORT_NAME_REGEX.is_match(code)
}

/// `validator` hook for the optional `short_name` field.
///
/// Blank values are accepted: they mean "generate one for me" on create and
/// "keep the current one" on update.
pub fn validate_short_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_valid_short_name(trimmed) {
        return Ok(());
    }

    let mut err = ValidationError::new("short_name");
    err.message = Some("must be 3-32 characters of [A-Za-z0-9_-]".into());
    Err(err)
}
