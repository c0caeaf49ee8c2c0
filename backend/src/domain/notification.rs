//! Events published when candidate availability changes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EmailAddress, User, UserId};

/// A candidate was blocked and can no longer be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUnavailable {
    pub candidate_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub occurred_at: DateTime<Utc>,
}

impl CandidateUnavailable {
    /// Build the event for a freshly blocked candidate.
    pub fn for_user(user: &User, occurred_at: DateTime<Utc>) -> Self {
        Self {
            candidate_id: user.id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.clone(),
            occurred_at,
        }
    }
}
