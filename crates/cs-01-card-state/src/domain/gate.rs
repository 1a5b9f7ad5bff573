//! API key verdicts.
//!
//! Policy is fail-closed: no record means Invalid regardless of what the
//! caller supplied. Reasons never include the expected secret.

use shared_types::ApiKeyRecord;

/// Base message for every rejected key.
pub const INVALID_KEY_MESSAGE: &str = "Invalid API key";

/// Result of checking a supplied secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyVerdict {
    Valid,
    /// Human-readable reason, safe to return to the caller.
    Invalid(String),
}

impl KeyVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, KeyVerdict::Valid)
    }

    /// Compose `base: detail`, or just the base when no detail is known.
    pub fn invalid(detail: Option<&str>) -> Self {
        match detail {
            Some(d) if !d.is_empty() => KeyVerdict::Invalid(format!("{}: {}", INVALID_KEY_MESSAGE, d)),
            _ => KeyVerdict::Invalid(INVALID_KEY_MESSAGE.to_string()),
        }
    }

    /// `Ok(())` when valid, otherwise the reason.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            KeyVerdict::Valid => Ok(()),
            KeyVerdict::Invalid(reason) => Err(reason),
        }
    }
}

/// Judge a supplied secret against the record looked up for the instance.
pub fn evaluate(record: Option<&ApiKeyRecord>, supplied: &str) -> KeyVerdict {
    let Some(record) = record else {
        return KeyVerdict::invalid(Some("no key issued for this card instance"));
    };

    if supplied.is_empty() {
        return KeyVerdict::invalid(Some("missing key"));
    }

    if constant_time_compare(supplied, &record.secret) {
        KeyVerdict::Valid
    } else {
        KeyVerdict::invalid(None)
    }
}

/// Constant-time string comparison.
///
/// Takes the same time regardless of how many bytes match, and compares the
/// lengths in constant time as well.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    // Different pad bytes so unequal lengths can never compare equal
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
