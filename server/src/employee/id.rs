//! Parsing of employee ids taken from request paths.
//!
//! Ids are unsigned 64-bit integer literals with the base implied by their
//! prefix: `0x` hex, `0o` octal, `0b` binary, a bare leading `0` octal, and
//! decimal otherwise. Underscores may separate digits.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("employee id is empty")]
    Empty,
    #[error("employee id {0:?} is not an unsigned integer")]
    Syntax(String),
    #[error("employee id {0:?} is out of range")]
    Range(String),
}

/// Parses a path segment into an employee id.
pub fn parse_employee_id(raw: &str) -> Result<u64, IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty);
    }
    let syntax = || IdError::Syntax(raw.to_string());

    let (radix, digits, prefixed) = split_radix(raw);
    if !underscores_ok(digits, prefixed) {
        return Err(syntax());
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        // "0x", "0b_" and friends
        return Err(syntax());
    }
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(syntax());
    }
    u64::from_str_radix(&digits, radix).map_err(|_| IdError::Range(raw.to_string()))
}

/// Returns the radix, the remaining digits, and whether a base prefix was
/// consumed. A lone `0` is decimal zero.
fn split_radix(raw: &str) -> (u32, &str, bool) {
    let bytes = raw.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return match bytes[1].to_ascii_lowercase() {
            b'x' => (16, &raw[2..], true),
            b'o' => (8, &raw[2..], true),
            b'b' => (2, &raw[2..], true),
            _ => (8, &raw[1..], true),
        };
    }
    (10, raw, false)
}

/// Every underscore must sit between two digits, or directly after a base
/// prefix and before a digit.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let chars: Vec<char> = digits.chars().collect();
    chars.iter().enumerate().all(|(i, &c)| {
        if c != '_' {
            return true;
        }
        let before = if i == 0 {
            prefixed
        } else {
            chars[i - 1].is_ascii_alphanumeric()
        };
        let after = chars.get(i + 1).is_some_and(|n| n.is_ascii_alphanumeric());
        before && after
    })
}
