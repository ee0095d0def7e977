//! Input validation for tracking numbers and key-value keys.

use regex::Regex;
use std::sync::LazyLock;

/// Tracking numbers: 1-64 ASCII letters, digits, hyphens or underscores.
///
/// Colons are excluded so a tracking number can never collide with a
/// namespaced key-value entry in the shared cache.
pub static TRACKING_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Maximum length of a key-value key, in bytes.
pub const MAX_KV_KEY_LEN: usize = 128;

/// Returns true if `sno` is a well-formed tracking number.
pub fn is_valid_tracking_number(sno: &str) -> bool {
    TRACKING_NUMBER_REGEX.is_match(sno)
}

/// Returns true if `key` can be used as a key-value key.
///
/// # Rules
///
/// - Length: 1-128 bytes
/// - No whitespace or control characters
pub fn is_valid_kv_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KV_KEY_LEN
        && !key.chars().any(|c| c.is_whitespace() || c.is_control())
}
