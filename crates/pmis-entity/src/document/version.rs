//! Document version history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pmis_core::types::UserId;

/// A historical version of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version label, e.g. `"1.2"`.
    pub version: String,
    /// User who uploaded this version.
    pub uploaded_by: UserId,
    /// When this version was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Optional note describing the change.
    #[serde(default)]
    pub change_note: Option<String>,
}

/// Computes the version label that follows `current`.
///
/// `"major.minor"` labels bump the minor component. Anything else gets a
/// `.1` suffix so the history stays ordered by insertion.
pub fn next_minor_version(current: &str) -> String {
    let trimmed = current.trim();
    if let Some((major, minor)) = trimmed.split_once('.') {
        if let (Ok(major), Ok(minor)) = (major.parse::<u32>(), minor.parse::<u32>()) {
            return format!("{major}.{}", minor + 1);
        }
    }
    if let Ok(major) = trimmed.parse::<u32>() {
        return format!("{major}.1");
    }
    format!("{trimmed}.1")
}
