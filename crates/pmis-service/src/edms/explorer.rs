//! Explorer view state: the selected folder, search box, layout, document
//! selection and context menu, over a cached folder tree.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use pmis_auth::Capability;
use pmis_core::config::edms::{EdmsConfig, ViewMode};
use pmis_core::traits::ProjectLookup;
use pmis_core::types::DocumentId;
use pmis_entity::document::Document;
use pmis_entity::folder::{FolderKey, FolderNode, FolderTree};

use super::filter::apply_filter;
use super::path::{Breadcrumb, FolderPath, breadcrumbs};
use super::tree::TreeBuilder;
use crate::context::RequestContext;

/// Separator between labels in the address bar.
pub const ADDRESS_SEPARATOR: &str = " / ";

/// An entry of the document context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextAction {
    /// Open the document preview.
    Open,
    /// Download the file.
    Download,
    /// Rename the document.
    Rename,
    /// Edit the tag set.
    EditTags,
    /// Upload a new version.
    NewVersion,
    /// Submit for approval.
    Submit,
    /// Add a comment to the noting sheet.
    Comment,
    /// Send back for revision.
    RequestRevision,
    /// Approve.
    Approve,
    /// Reject.
    Reject,
    /// Delete the document.
    Delete,
}

impl ContextAction {
    /// Actions offered on `document` to the user behind `ctx`.
    pub fn available(document: &Document, ctx: &RequestContext) -> Vec<ContextAction> {
        let mut actions = Vec::new();
        if !ctx.has_permission(Capability::ViewDocuments) {
            return actions;
        }
        actions.extend([Self::Open, Self::Download]);

        if !ctx.can_access_project(&document.project_id) {
            return actions;
        }
        let status = document.status;
        if ctx.has_permission(Capability::EditDocument) {
            actions.extend([Self::Rename, Self::EditTags]);
        }
        if ctx.has_permission(Capability::UploadDocument) {
            actions.push(Self::NewVersion);
        }
        if ctx.has_permission(Capability::EditDocument) && status.can_submit() {
            actions.push(Self::Submit);
        }
        if ctx.has_permission(Capability::ReviewDocument) {
            actions.push(Self::Comment);
            if status.is_awaiting_decision() {
                actions.push(Self::RequestRevision);
            }
        }
        if ctx.has_permission(Capability::ApproveDocument) && !status.is_decided() {
            actions.extend([Self::Approve, Self::Reject]);
        }
        if ctx.has_permission(Capability::DeleteDocument) {
            actions.push(Self::Delete);
        }
        actions
    }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextMenu {
    /// The document the menu was opened on.
    pub document_id: DocumentId,
    /// Offered actions, in display order.
    pub actions: Vec<ContextAction>,
}

/// State of one document explorer.
///
/// The folder tree is cached together with the store revision it was
/// derived from and rebuilt from scratch when the revision moves.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    builder: TreeBuilder,
    tree: FolderTree,
    revision: Option<u64>,
    path: FolderPath,
    query: String,
    view: ViewMode,
    selection: BTreeSet<DocumentId>,
    context_menu: Option<ContextMenu>,
}

impl ExplorerState {
    /// Create an explorer over an empty tree, rooted at "All Documents".
    pub fn new(builder: TreeBuilder, view: ViewMode) -> Self {
        let tree = FolderTree::new(FolderNode::new(FolderKey::Root, builder.root_label()));
        Self {
            builder,
            tree,
            revision: None,
            path: FolderPath::root(),
            query: String::new(),
            view,
            selection: BTreeSet::new(),
            context_menu: None,
        }
    }

    /// Create an explorer configured from `config`.
    pub fn from_config(config: &EdmsConfig) -> Self {
        Self::new(TreeBuilder::from_config(config), config.default_view)
    }

    /// Rebuild the tree if `revision` differs from the cached one.
    ///
    /// When the selected folder disappears the path falls back to its
    /// nearest surviving ancestor. Selected documents that no longer exist
    /// are dropped. Returns whether the tree was rebuilt.
    pub fn refresh<L>(&mut self, documents: &[Document], revision: u64, projects: &L) -> bool
    where
        L: ProjectLookup + ?Sized,
    {
        if self.revision == Some(revision) {
            return false;
        }
        self.tree = self.builder.build(documents, projects);
        self.revision = Some(revision);

        let mut selected = self.path.selected().clone();
        while self.tree.get_key(&selected).is_none() {
            match selected.parent() {
                Some(parent) => selected = parent,
                None => break,
            }
        }
        if &selected != self.path.selected() {
            debug!(folder = %selected, "Selected folder vanished; moved to ancestor");
            self.path = FolderPath::to_key(selected);
        }

        self.selection
            .retain(|id| documents.iter().any(|doc| &doc.id == id));
        let menu_target_gone = self
            .context_menu
            .as_ref()
            .is_some_and(|menu| !documents.iter().any(|doc| doc.id == menu.document_id));
        if menu_target_gone {
            self.context_menu = None;
        }

        debug!(revision, nodes = self.tree.len(), "Explorer refreshed");
        true
    }

    /// The cached folder tree.
    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    /// Store revision the tree was built from.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// The selected path.
    pub fn path(&self) -> &FolderPath {
        &self.path
    }

    /// The selected folder node.
    pub fn current_folder(&self) -> Option<&FolderNode> {
        self.tree.get_key(self.path.selected())
    }

    /// Select the folder `key`. Unknown folders are ignored.
    pub fn navigate(&mut self, key: FolderKey) -> bool {
        if self.tree.get_key(&key).is_none() {
            return false;
        }
        self.replace_path(FolderPath::to_key(key));
        true
    }

    /// Select the folder with composite id `id`. Unknown folders are ignored.
    pub fn navigate_to_id(&mut self, id: &str) -> bool {
        let path = FolderPath::resolve(&self.tree, id);
        self.navigate(path.selected().clone())
    }

    /// Select the parent folder. Returns `false` at the root.
    pub fn navigate_up(&mut self) -> bool {
        match self.path.parent() {
            Some(parent) => {
                self.replace_path(parent);
                true
            }
            None => false,
        }
    }

    /// Select the breadcrumb at `index` (0 = root).
    pub fn navigate_to_crumb(&mut self, index: usize) -> bool {
        match self.path.truncated(index) {
            Some(path) => {
                self.replace_path(path);
                true
            }
            None => false,
        }
    }

    fn replace_path(&mut self, path: FolderPath) {
        if path != self.path {
            self.selection.clear();
            self.context_menu = None;
        }
        self.path = path;
    }

    /// The raw search box contents.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search box contents.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The current layout.
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switch between grid and list layout.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        self.view
    }

    /// Select a document. Without `additive` the previous selection is
    /// replaced.
    pub fn select(&mut self, id: DocumentId, additive: bool) {
        if !additive {
            self.selection.clear();
        }
        self.selection.insert(id);
    }

    /// Remove a document from the selection.
    pub fn deselect(&mut self, id: &DocumentId) -> bool {
        self.selection.remove(id)
    }

    /// Clear the document selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected document ids.
    pub fn selection(&self) -> &BTreeSet<DocumentId> {
        &self.selection
    }

    /// Open the context menu on `document` for the user behind `ctx`.
    pub fn open_context_menu(&mut self, document: &Document, ctx: &RequestContext) -> &ContextMenu {
        self.context_menu.insert(ContextMenu {
            document_id: document.id.clone(),
            actions: ContextAction::available(document, ctx),
        })
    }

    /// Close the context menu.
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// The open context menu.
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Documents shown for the current folder and query.
    pub fn visible(&self, documents: &[Document]) -> Vec<Document> {
        apply_filter(documents, &self.path, &self.query)
    }

    /// Breadcrumb trail of the selected folder.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.tree, &self.path)
    }

    /// Breadcrumb labels joined for the address bar.
    pub fn address_bar(&self) -> String {
        self.breadcrumbs()
            .iter()
            .map(|crumb| crumb.label.as_str())
            .collect::<Vec<_>>()
            .join(ADDRESS_SEPARATOR)
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::from_config(&EdmsConfig::default())
    }
}
