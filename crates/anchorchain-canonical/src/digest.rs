use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

use crate::validation::ValidationError;

/// Number of hex characters in a SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

fn digest_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex"))
}

/// SHA-256 digest encoded as 64 lowercase hex characters.
///
/// Digests are compared and concatenated as text: Merkle parents hash the
/// concatenation of their children's hex strings, not the decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Parses a digest, rejecting anything but 64 lowercase hex characters.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !digest_pattern().is_match(&value) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value,
            });
        }
        Ok(Self(value))
    }

    /// The all-zero digest used as the genesis block's previous hash.
    pub fn zero() -> Self {
        Self("0".repeat(DIGEST_HEX_LEN))
    }

    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex text of the digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of leading `'0'` hex characters.
    pub fn leading_zeros(&self) -> usize {
        self.0.bytes().take_while(|b| *b == b'0').count()
    }
}

impl TryFrom<String> for Digest {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Digest> for String {
    fn from(value: Digest) -> Self {
        value.0
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashes `bytes` with SHA-256 and returns the lowercase hex digest.
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes.as_ref());
    Digest::from_hasher(hasher)
}
