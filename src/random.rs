//! Random strings for generated secrets and default configs.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;

/// Upper- and lower-case ASCII letters plus digits: all 62 of them, `J` and
/// `j` included.
pub const CHARSET_ALPHANUMERIC: &str =
    "1234567890ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generate `length` characters drawn uniformly from `alphabet`.
///
/// Characters are Unicode scalar values, so multi-byte characters count as
/// one. Entropy comes from the operating system.
///
/// # Panics
///
/// Panics if `alphabet` is empty while `length` is non-zero, or if the
/// operating system's random source fails. A weaker fallback is never used.
///
/// ```
/// let token = yamlcfg::random_string("abcd1", 100);
/// assert_eq!(token.chars().count(), 100);
/// assert!(token.chars().all(|c| "abcd1".contains(c)));
/// ```
pub fn random_string(alphabet: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }

    let chars: Vec<char> = alphabet.chars().collect();
    assert!(!chars.is_empty(), "random_string needs a non-empty alphabet");

    let index = Uniform::from(0..chars.len());
    (0..length).map(|_| chars[index.sample(&mut OsRng)]).collect()
}

/// Generate `length` characters from [`CHARSET_ALPHANUMERIC`].
pub fn random_alphanumeric(length: usize) -> String {
    random_string(CHARSET_ALPHANUMERIC, length)
}
