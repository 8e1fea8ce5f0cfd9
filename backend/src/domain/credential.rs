//! Credential codec: salt generation, digest derivation, and verification.
//!
//! The codec is pure and performs no I/O, so it is safe to call from any
//! number of concurrent request handlers. Plaintext passwords are derived
//! into a keyed one-way digest; nothing recoverable is ever stored.

use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes drawn for each salt.
const SALT_BYTES: usize = 16;

/// Per-account random value mixed into digest derivation.
///
/// ## Invariants
/// - Generated once at account creation and never reused across accounts.
/// - Hex-encoded output of a 128-bit CSPRNG draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(String);

impl Salt {
    /// Draw a fresh salt from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Reconstruct a salt from its stored representation.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Hex-encoded salt value as persisted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One-way derived representation of a password.
///
/// An empty digest is the defined sentinel for "nothing derivable": it is
/// produced when the plaintext is empty or the keyed-hash construction cannot
/// be initialised, and it never matches during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// The empty sentinel digest.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Derive a digest from a plaintext password under the given salt.
    ///
    /// Deterministic for a fixed `(plaintext, salt)` pair. Returns the empty
    /// sentinel, not an error, for an empty plaintext or a failed keyed-hash
    /// initialisation.
    pub fn derive(plaintext: &str, salt: &Salt) -> Self {
        if plaintext.is_empty() {
            return Self::empty();
        }

        let Ok(mut mac) = HmacSha256::new_from_slice(salt.as_str().as_bytes()) else {
            return Self::empty();
        };
        mac.update(plaintext.as_bytes());
        Self(hex::encode(mac.finalize().into_bytes()))
    }

    /// Reconstruct a digest from its stored representation.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether this digest is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encoded digest value as persisted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Recompute the digest for `plaintext` under `salt` and compare it to
/// `expected` in constant time.
///
/// The empty sentinel never matches, on either side of the comparison.
pub fn verify(plaintext: &str, salt: &Salt, expected: &Digest) -> bool {
    if expected.is_empty() {
        return false;
    }
    let computed = Digest::derive(plaintext, salt);
    if computed.is_empty() {
        return false;
    }
    computed
        .as_str()
        .as_bytes()
        .ct_eq(expected.as_str().as_bytes())
        .into()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn generated_salts_are_distinct_and_128_bits() {
        let first = Salt::generate();
        let second = Salt::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), SALT_BYTES * 2);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn derivation_is_deterministic_per_salt() {
        let salt = Salt::generate();
        assert_eq!(
            Digest::derive("correct horse", &salt),
            Digest::derive("correct horse", &salt)
        );
    }

    #[test]
    fn same_password_under_different_salts_differs() {
        let first = Salt::generate();
        let second = Salt::generate();
        assert_ne!(
            Digest::derive("shared password", &first),
            Digest::derive("shared password", &second)
        );
    }

    #[test]
    fn digest_never_equals_plaintext() {
        let salt = Salt::generate();
        assert_ne!(Digest::derive("secret", &salt).as_str(), "secret");
    }

    #[rstest]
    #[case("pw1")]
    #[case("correct horse battery staple")]
    #[case(" spaced password ")]
    fn verify_round_trips_for_non_empty_plaintext(#[case] plaintext: &str) {
        let salt = Salt::generate();
        let digest = Digest::derive(plaintext, &salt);
        assert!(verify(plaintext, &salt, &digest));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let salt = Salt::generate();
        let digest = Digest::derive("right", &salt);
        assert!(!verify("wrong", &salt, &digest));
    }

    #[test]
    fn empty_plaintext_derives_the_sentinel_for_every_salt() {
        for _ in 0..4 {
            let salt = Salt::generate();
            assert!(Digest::derive("", &salt).is_empty());
        }
    }

    #[test]
    fn verify_rejects_empty_plaintext_against_real_digest() {
        let salt = Salt::generate();
        let digest = Digest::derive("something", &salt);
        assert!(!verify("", &salt, &digest));
    }

    #[test]
    fn sentinel_digest_never_matches() {
        let salt = Salt::generate();
        assert!(!verify("anything", &salt, &Digest::empty()));
        // Not even an empty plaintext, which itself derives the sentinel.
        assert!(!verify("", &salt, &Digest::empty()));
    }
}
