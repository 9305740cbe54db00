//! Control grants issued to auction winners.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Timestamp};

/// An identity's right to operate a resource for a time window.
///
/// One grant per resource; a later finalization on the same resource
/// overwrites it. The window is recorded, not enforced: lookups by
/// controller ignore it, and callers that care about freshness check
/// [`ControlGrant::covers`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlGrant {
    pub controller: AccountId,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
}

impl ControlGrant {
    #[must_use]
    pub fn new(controller: AccountId, valid_from: Timestamp, valid_until: Timestamp) -> Self {
        Self {
            controller,
            valid_from,
            valid_until,
        }
    }

    /// Whether `at` falls inside `[valid_from, valid_until]`.
    #[must_use]
    pub fn covers(&self, at: Timestamp) -> bool {
        self.valid_from <= at && at <= self.valid_until
    }

    #[must_use]
    pub fn is_held_by(&self, who: AccountId) -> bool {
        self.controller == who
    }
}
