//! Document approval status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a document is in the review and approval cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Uploaded but not yet submitted.
    Draft,
    /// Submitted and waiting for an approver.
    #[serde(rename = "Pending_Approval")]
    PendingApproval,
    /// Sent back for revision or under technical review.
    #[serde(rename = "Under_Review")]
    UnderReview,
    /// Approved for use.
    Approved,
    /// Rejected by an approver.
    Rejected,
}

impl DocumentStatus {
    /// Every status.
    pub const ALL: [DocumentStatus; 5] = [
        Self::Draft,
        Self::PendingApproval,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
    ];

    /// Return the status label used in records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingApproval => "Pending_Approval",
            Self::UnderReview => "Under_Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether an approver decision has already been taken.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether the document sits in an approver's queue.
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self, Self::PendingApproval | Self::UnderReview)
    }

    /// Whether the document may be submitted for approval from this status.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected | Self::UnderReview)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
