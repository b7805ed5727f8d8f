//! Password handling: salted one-way digests, never raw secrets.
//!
//! The store only ever sees [`PasswordHash`] values. Verification recomputes
//! the digest under the stored salt and compares in constant time, so neither
//! the secret nor timing information leaks.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const ENCODING_VERSION: &str = "v1";

/// Validation errors for raw password input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    EmptyPassword,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// A caller-supplied password held in a zeroizing buffer.
///
/// ## Invariants
/// - Non-empty; interior whitespace is preserved to avoid surprising
///   credential comparisons.
#[derive(Clone)]
pub struct PlainPassword(Zeroizing<String>);

impl PlainPassword {
    /// Validate and wrap a raw password.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PasswordValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(..)")
    }
}

/// Salted SHA-256 digest of a password.
///
/// Stored and transported as `v1$<salt hex>$<digest hex>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

/// Errors raised when decoding a stored hash string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashParseError {
    #[error("password hash encoding is malformed")]
    Malformed,
    #[error("unsupported password hash version: {version}")]
    UnsupportedVersion { version: String },
}

impl PasswordHash {
    /// Derive a hash for the given password under a fresh random salt.
    pub fn derive(password: &PlainPassword) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        let digest = Self::digest_with_salt(&salt, password);
        Self { salt, digest }
    }

    /// Verify a candidate password against the stored digest.
    ///
    /// Recomputes under the stored salt and compares in constant time.
    pub fn verify(&self, candidate: &PlainPassword) -> bool {
        let candidate_digest = Self::digest_with_salt(&self.salt, candidate);
        constant_time_eq(&self.digest, &candidate_digest)
    }

    fn digest_with_salt(salt: &[u8; SALT_LEN], password: &PlainPassword) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hasher.finalize().into()
    }

    /// Encode for storage.
    pub fn encode(&self) -> String {
        format!(
            "{ENCODING_VERSION}${}${}",
            hex::encode(self.salt),
            hex::encode(self.digest)
        )
    }

    /// Decode a stored hash string.
    pub fn decode(encoded: &str) -> Result<Self, PasswordHashParseError> {
        let mut parts = encoded.split('$');
        let (Some(version), Some(salt_hex), Some(digest_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PasswordHashParseError::Malformed);
        };
        if version != ENCODING_VERSION {
            return Err(PasswordHashParseError::UnsupportedVersion {
                version: version.to_owned(),
            });
        }

        let salt_bytes = hex::decode(salt_hex).map_err(|_| PasswordHashParseError::Malformed)?;
        let digest_bytes =
            hex::decode(digest_hex).map_err(|_| PasswordHashParseError::Malformed)?;
        let salt: [u8; SALT_LEN] = salt_bytes
            .try_into()
            .map_err(|_| PasswordHashParseError::Malformed)?;
        let digest: [u8; DIGEST_LEN] = digest_bytes
            .try_into()
            .map_err(|_| PasswordHashParseError::Malformed)?;
        Ok(Self { salt, digest })
    }
}

/// Compare two equal-length byte slices without early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn password(raw: &str) -> PlainPassword {
        PlainPassword::new(raw).expect("valid test password")
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = PlainPassword::new("").expect_err("empty password must fail");
        assert_eq!(err, PasswordValidationError::EmptyPassword);
    }

    #[test]
    fn derive_then_verify_succeeds() {
        let hash = PasswordHash::derive(&password("pw123456"));
        assert!(hash.verify(&password("pw123456")));
        assert!(!hash.verify(&password("pw123457")));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = PasswordHash::derive(&password("pw123456"));
        let b = PasswordHash::derive(&password("pw123456"));
        assert_ne!(a.encode(), b.encode());
    }

    #[test]
    fn encode_decode_round_trips() {
        let hash = PasswordHash::derive(&password("correct horse battery staple"));
        let decoded = PasswordHash::decode(&hash.encode()).expect("decodes");
        assert_eq!(hash, decoded);
        assert!(decoded.verify(&password("correct horse battery staple")));
    }

    #[rstest]
    #[case("")]
    #[case("v1")]
    #[case("v1$abc")]
    #[case("v1$zz$zz")]
    #[case("v1$00$00$00")]
    fn malformed_encodings_are_rejected(#[case] encoded: &str) {
        assert!(matches!(
            PasswordHash::decode(encoded),
            Err(PasswordHashParseError::Malformed)
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let hash = PasswordHash::derive(&password("pw"));
        let bumped = hash.encode().replacen("v1", "v9", 1);
        assert!(matches!(
            PasswordHash::decode(&bumped),
            Err(PasswordHashParseError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let secret = password("hunter2");
        assert_eq!(format!("{secret:?}"), "PlainPassword(..)");
    }
}
