//! Path resolution: selected folder paths, their document filters, and
//! breadcrumb labels.
//!
//! A [`FolderPath`] is a sequence of structured [`FolderKey`]s from the root
//! down to the selected folder. Filters are read straight off the selected
//! key; composite id strings are only decoded when a caller hands in a raw
//! id (CLI arguments, bookmarked addresses).

use serde::Serialize;

use pmis_core::types::ProjectId;
use pmis_entity::document::{Discipline, Document, Phase};
use pmis_entity::folder::{FolderKey, FolderTree, ROOT_ID};

/// The currently selected folder, as the chain of keys leading to it.
///
/// Always starts with [`FolderKey::Root`] and is replaced wholesale on
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderPath {
    keys: Vec<FolderKey>,
}

impl FolderPath {
    /// The path selecting the root folder.
    pub fn root() -> Self {
        Self {
            keys: vec![FolderKey::Root],
        }
    }

    /// The path selecting `key`, with every ancestor filled in.
    pub fn to_key(key: FolderKey) -> Self {
        Self {
            keys: key.lineage(),
        }
    }

    /// The path selecting the folder with composite id `id`.
    ///
    /// Decodes the id without a tree; see [`parse_legacy_id`].
    pub fn from_id(id: &str) -> Self {
        Self::to_key(parse_legacy_id(id))
    }

    /// The path selecting the folder with composite id `id` in `tree`.
    ///
    /// An id present in the tree resolves through the tree's index, which
    /// handles project ids with any number of dashes. Unknown ids fall back
    /// to [`parse_legacy_id`].
    pub fn resolve(tree: &FolderTree, id: &str) -> Self {
        match tree.get(id) {
            Some(node) => Self::to_key(node.key.clone()),
            None => Self::from_id(id),
        }
    }

    /// The selected (deepest) key.
    pub fn selected(&self) -> &FolderKey {
        self.keys.last().unwrap_or(&FolderKey::Root)
    }

    /// Keys from the root to the selected folder.
    pub fn keys(&self) -> &[FolderKey] {
        &self.keys
    }

    /// Composite ids from the root to the selected folder.
    pub fn ids(&self) -> Vec<String> {
        self.keys.iter().map(FolderKey::node_id).collect()
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the path selects the root.
    pub fn is_root(&self) -> bool {
        self.selected() == &FolderKey::Root
    }

    /// Always `false`: a path holds at least the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The path to the parent folder, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.selected().parent().map(Self::to_key)
    }

    /// The path truncated to the entry at `index` (0 = root).
    pub fn truncated(&self, index: usize) -> Option<Self> {
        self.keys.get(index).cloned().map(Self::to_key)
    }
}

impl Default for FolderPath {
    fn default() -> Self {
        Self::root()
    }
}

impl From<FolderKey> for FolderPath {
    fn from(key: FolderKey) -> Self {
        Self::to_key(key)
    }
}

/// Equality restrictions derived from a selected folder, AND-composed in
/// the order project, phase, discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderFilter {
    /// Required project.
    pub project_id: Option<ProjectId>,
    /// Required phase.
    pub phase: Option<Phase>,
    /// Required discipline.
    pub discipline: Option<Discipline>,
}

impl FolderFilter {
    /// The filter that matches every document.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Whether this filter imposes no restriction.
    pub fn is_unrestricted(&self) -> bool {
        self.project_id.is_none() && self.phase.is_none() && self.discipline.is_none()
    }

    /// Whether `document` satisfies every present restriction.
    pub fn matches(&self, document: &Document) -> bool {
        self.project_id
            .as_ref()
            .is_none_or(|project| &document.project_id == project)
            && self.phase.is_none_or(|phase| document.phase == phase)
            && self
                .discipline
                .is_none_or(|discipline| document.discipline == discipline)
    }
}

impl From<&FolderKey> for FolderFilter {
    fn from(key: &FolderKey) -> Self {
        Self {
            project_id: key.project_id().cloned(),
            phase: key.phase_restriction(),
            discipline: key.discipline_restriction(),
        }
    }
}

/// The filter selecting the documents under `path`.
pub fn resolve_filter(path: &FolderPath) -> FolderFilter {
    FolderFilter::from(path.selected())
}

/// Decode a composite folder id without consulting a tree.
///
/// - `"all"` is the root.
/// - An id without a dash is a bare project id.
/// - Otherwise the first two dash tokens form the project id, the third
///   names the phase and the fourth the discipline. A token that does not
///   name a phase or discipline ends decoding at the level above it.
///
/// Project ids must therefore contain exactly one dash to decode this way.
/// Prefer [`FolderPath::resolve`] when a tree is at hand.
pub fn parse_legacy_id(id: &str) -> FolderKey {
    if id == ROOT_ID {
        return FolderKey::Root;
    }
    if !id.contains('-') {
        return FolderKey::project(id);
    }

    let mut tokens = id.split('-');
    let head = tokens.next().unwrap_or_default();
    let tail = tokens.next().unwrap_or_default();
    let project_id = ProjectId::new(format!("{head}-{tail}"));

    let Some(phase) = tokens.next().and_then(|t| t.parse::<Phase>().ok()) else {
        return FolderKey::Project { project_id };
    };
    let Some(discipline) = tokens.next().and_then(|t| t.parse::<Discipline>().ok()) else {
        return FolderKey::Phase { project_id, phase };
    };
    FolderKey::Discipline {
        project_id,
        phase,
        discipline,
    }
}

/// Display label for the folder with composite id `id`, or the raw id
/// when the tree has no such folder.
pub fn label_for(tree: &FolderTree, id: &str) -> String {
    tree.get(id)
        .map(|node| node.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Composite folder id.
    pub id: String,
    /// Structured key.
    pub key: FolderKey,
    /// Display label.
    pub label: String,
    /// Documents under the folder; zero when the folder is not in the tree.
    pub document_count: u64,
}

/// Breadcrumb trail for `path`, root first.
pub fn breadcrumbs(tree: &FolderTree, path: &FolderPath) -> Vec<Breadcrumb> {
    path.keys()
        .iter()
        .map(|key| {
            let id = key.node_id();
            let node = tree.get_key(key);
            Breadcrumb {
                label: node
                    .map(|n| n.name.clone())
                    .unwrap_or_else(|| id.clone()),
                document_count: node.map(|n| n.document_count).unwrap_or(0),
                key: key.clone(),
                id,
            }
        })
        .collect()
}
