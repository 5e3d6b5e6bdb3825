//! Static seed data: projects, users, and documents.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use pmis_core::error::{AppError, ErrorKind};
use pmis_core::result::AppResult;
use pmis_entity::document::Document;
use pmis_entity::project::Project;
use pmis_entity::user::User;

/// Seed bundled into the binary.
const EMBEDDED_SEED: &str = include_str!("../../../data/seed.json");

/// The records the dashboard starts from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    /// Projects in the programme.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Users who may log in.
    #[serde(default)]
    pub users: Vec<User>,
    /// Document records, in display order.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Seed {
    /// Parses a seed from JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The seed bundled into the binary.
    pub fn embedded() -> AppResult<Self> {
        Self::from_json(EMBEDDED_SEED)
    }

    /// Reads a seed file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Cannot read seed file '{}': {e}", path.display()),
                e,
            )
        })?;
        let seed = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            projects = seed.projects.len(),
            users = seed.users.len(),
            documents = seed.documents.len(),
            "Seed loaded"
        );
        Ok(seed)
    }

    /// Reads `path` if given, otherwise the embedded seed.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }
}
