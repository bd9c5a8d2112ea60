use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a submitted log.
///
/// Lets audit events be correlated without writing raw log text
/// (which may contain customer data) into application logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct LogDigest(pub [u8; 32]);

impl LogDigest {
    /// Creates a `LogDigest` from a raw 32-byte array.
    #[must_use]
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hashes the given log text.
    ///
    /// # Complexity
    /// O(n) in the length of `log`.
    #[must_use]
    pub fn of(log: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(log.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 12 hex characters, enough to correlate log lines.
    #[must_use]
    pub fn short(&self) -> String {
        let mut hex = self.to_string();
        hex.truncate(12);
        hex
    }
}

impl fmt::Display for LogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
