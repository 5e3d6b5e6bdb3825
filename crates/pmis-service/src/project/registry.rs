//! Read-only project registry used for folder labels and upload checks.

use std::collections::HashMap;

use pmis_core::traits::ProjectLookup;
use pmis_core::types::ProjectId;
use pmis_entity::project::Project;

/// The seeded project set, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    /// Projects in seed order.
    projects: Vec<Project>,
    /// Project id → position in `projects`.
    by_id: HashMap<ProjectId, usize>,
}

impl ProjectRegistry {
    /// Builds a registry from seeded projects. Later duplicates of an id
    /// are ignored.
    pub fn new(projects: Vec<Project>) -> Self {
        let mut by_id = HashMap::with_capacity(projects.len());
        for (pos, project) in projects.iter().enumerate() {
            by_id.entry(project.id.clone()).or_insert(pos);
        }
        Self { projects, by_id }
    }

    /// Finds a project by id.
    pub fn find(&self, id: &ProjectId) -> Option<&Project> {
        self.by_id.get(id).and_then(|&pos| self.projects.get(pos))
    }

    /// Whether the project exists.
    pub fn contains(&self, id: &ProjectId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every project, in seed order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectLookup for ProjectRegistry {
    fn project_name(&self, id: &ProjectId) -> Option<String> {
        self.find(id).map(|project| project.name.clone())
    }
}
