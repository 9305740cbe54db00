//! Identifiers used throughout the registry.
//!
//! Resources are addressed by a fixed 32-byte handle derived from a
//! human-readable device name. Principals (callers, bidders, owners, the
//! administrator) use UUIDv7.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{DadiError, Result, constants};

// ---------------------------------------------------------------------------
// ResourceId
// ---------------------------------------------------------------------------

/// Opaque 32-byte handle identifying an auctioned device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ResourceId(pub [u8; 32]);

impl ResourceId {
    /// Hash a device name into a resource handle.
    ///
    /// `SHA-256(domain_sep || name)`. Two calls with the same name always
    /// produce the same id; the name cannot be recovered.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::RESOURCE_NAME_DOMAIN);
        hasher.update(name.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Pack a short label into the handle, right-padded with zeros.
    ///
    /// The last byte is always left zero so the label stays terminated,
    /// which caps labels at 31 bytes.
    ///
    /// # Errors
    /// Returns `InvalidResourceId` if the label is empty, too long, or
    /// contains a NUL byte.
    pub fn from_label(label: &str) -> Result<Self> {
        let bytes = label.as_bytes();
        if bytes.is_empty() {
            return Err(DadiError::InvalidResourceId {
                reason: "label is empty".to_string(),
            });
        }
        if bytes.len() > constants::MAX_LABEL_LEN {
            return Err(DadiError::InvalidResourceId {
                reason: format!(
                    "label is {} bytes, limit is {}",
                    bytes.len(),
                    constants::MAX_LABEL_LEN
                ),
            });
        }
        if bytes.contains(&0) {
            return Err(DadiError::InvalidResourceId {
                reason: "label contains a NUL byte".to_string(),
            });
        }
        let mut out = [0u8; 32];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Recover the label of an id built with [`ResourceId::from_label`].
    ///
    /// Returns `None` for hashed ids or anything that isn't a
    /// zero-terminated UTF-8 string.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        let end = self.0.iter().position(|&b| b == 0)?;
        if end == 0 || self.0[end..].iter().any(|&b| b != 0) {
            return None;
        }
        std::str::from_utf8(&self.0[..end]).ok()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex prefix for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// An addressable principal: caller, bidder, auction owner or administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}
