//! Project entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pmis_core::types::{ProjectId, UserId};

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not yet started.
    Planned,
    /// In progress.
    Active,
    /// Paused.
    OnHold,
    /// Handed over.
    Completed,
}

/// A project in the programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Short contract code.
    pub code: String,
    /// Site location.
    #[serde(default)]
    pub location: Option<String>,
    /// Delivery status.
    pub status: ProjectStatus,
    /// Responsible project manager.
    #[serde(default)]
    pub manager_id: Option<UserId>,
    /// Planned start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Planned completion date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}
