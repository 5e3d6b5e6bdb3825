//! Noting sheet entries: the append-only remark log on a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use pmis_core::AppError;
use pmis_core::types::{NotingEntryId, UserId};

use super::status::DocumentStatus;
use crate::user::UserRole;

/// What a noting sheet entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotingAction {
    /// A remark with no effect on status.
    Comment,
    /// Approval of the current version.
    Approve,
    /// Rejection of the current version.
    Reject,
    /// Request for the uploader to revise.
    RequestRevision,
}

impl NotingAction {
    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::RequestRevision => "request_revision",
        }
    }

    /// The status a document moves to when this action is recorded.
    pub fn resulting_status(&self) -> Option<DocumentStatus> {
        match self {
            Self::Comment => None,
            Self::Approve => Some(DocumentStatus::Approved),
            Self::Reject => Some(DocumentStatus::Rejected),
            Self::RequestRevision => Some(DocumentStatus::UnderReview),
        }
    }
}

impl fmt::Display for NotingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotingAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "comment" => Ok(Self::Comment),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "request_revision" | "revise" => Ok(Self::RequestRevision),
            _ => Err(AppError::validation(format!(
                "Invalid noting action: '{s}'. Expected one of: comment, approve, reject, request_revision"
            ))),
        }
    }
}

/// A single entry in a document's noting sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotingEntry {
    /// Unique entry identifier.
    pub id: NotingEntryId,
    /// The user who wrote the entry.
    pub author_id: UserId,
    /// Display name of the author at the time of writing.
    pub author_name: String,
    /// Role of the author at the time of writing.
    pub author_role: UserRole,
    /// What the entry records.
    pub action: NotingAction,
    /// Free-text remark.
    pub remark: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}
