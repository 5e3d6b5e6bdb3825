//! Interactive document explorer.
//!
//! Folder navigation, search, view switching and document context menus
//! over a single [`ExplorerState`]. The tree is refreshed from the store
//! after every step and rebuilt only when the store revision moved; the
//! store's change events since the previous step are listed above the view.

use std::collections::BTreeSet;

use clap::Args;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

use super::list::DocumentRow;
use crate::output::{self, OutputFormat};
use pmis_core::config::edms::ViewMode;
use pmis_core::error::AppError;
use pmis_core::events::{DocumentEvent, DomainEvent};
use pmis_entity::document::{Document, NotingAction};
use pmis_entity::folder::FolderKey;
use pmis_service::document::AddVersionRequest;
use pmis_service::edms::{ContextAction, ExplorerState};
use pmis_service::{AppState, RequestContext};

/// Arguments for the explore command
#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Folder to open first
    #[arg(short, long)]
    pub path: Option<String>,

    /// Initial search text
    #[arg(short, long)]
    pub query: Option<String>,
}

/// A line of the main menu.
enum MenuItem {
    Folder(FolderKey),
    Up,
    Crumb,
    Search,
    ClearSearch,
    ToggleView,
    Document,
    Tree,
    Quit,
}

/// Execute the explore command
pub async fn execute(
    args: &ExploreArgs,
    state: &AppState,
    ctx: &RequestContext,
) -> Result<(), AppError> {
    let (mut explorer, _) = state.open_explorer(ctx).await?;
    let mut events = state.store.subscribe();

    if let Some(path) = &args.path {
        if !explorer.navigate_to_id(path) {
            output::print_warning(&format!("Folder '{}' not found; starting at the root", path));
        }
    }
    if let Some(query) = &args.query {
        explorer.set_query(query.as_str());
    }

    loop {
        let documents = state.refresh_explorer(ctx, &mut explorer).await?;
        let changes = drain_changes(&mut events, &documents);

        let visible = explorer.visible(&documents);
        render(state, &explorer, &documents, &visible, &changes);

        let (labels, items) = main_menu(&explorer, &visible);
        let Some(choice) = select("Action", &labels)? else {
            break;
        };

        match &items[choice] {
            MenuItem::Folder(key) => {
                explorer.navigate(key.clone());
            }
            MenuItem::Up => {
                explorer.navigate_up();
            }
            MenuItem::Crumb => {
                let crumbs: Vec<String> = explorer
                    .breadcrumbs()
                    .into_iter()
                    .map(|crumb| crumb.label)
                    .collect();
                if let Some(index) = select("Go to", &crumbs)? {
                    explorer.navigate_to_crumb(index);
                }
            }
            MenuItem::Search => {
                let query = super::prompt_text("Search")?;
                explorer.set_query(query);
            }
            MenuItem::ClearSearch => explorer.set_query(""),
            MenuItem::ToggleView => {
                explorer.toggle_view();
            }
            MenuItem::Document => {
                if let Err(e) = document_menu(state, ctx, &mut explorer, &visible).await {
                    output::print_error(&e.to_string());
                }
            }
            MenuItem::Tree => print!("{}", output::render_tree(&explorer.tree().root, false)),
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

/// Describe every store event received since the last call, oldest first.
fn drain_changes(events: &mut broadcast::Receiver<DomainEvent>, documents: &[Document]) -> Vec<String> {
    let mut changes = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => {
                debug!(revision = event.revision, payload = ?event.payload, "Store changed");
                changes.push(describe(&event.payload, documents));
            }
            Err(TryRecvError::Lagged(missed)) => {
                changes.push(format!("{} earlier changes not shown", missed));
            }
            Err(_) => break,
        }
    }
    changes
}

fn describe(event: &DocumentEvent, documents: &[Document]) -> String {
    let id = event.document_id();
    let name = documents
        .iter()
        .find(|doc| &doc.id == id)
        .map(|doc| doc.name.as_str())
        .unwrap_or(id.as_str());
    match event {
        DocumentEvent::Created { name, project_id, .. } => {
            format!("Uploaded '{}' to {}", name, project_id)
        }
        DocumentEvent::Updated { .. } => format!("Updated '{}'", name),
        DocumentEvent::Deleted { name, .. } => format!("Deleted '{}'", name),
        DocumentEvent::Noted { action, .. } => format!("Recorded {} on '{}'", action, name),
        DocumentEvent::VersionAdded { version, .. } => {
            format!("'{}' is now at version {}", name, version)
        }
    }
}

fn main_menu(explorer: &ExplorerState, visible: &[Document]) -> (Vec<String>, Vec<MenuItem>) {
    let mut labels = Vec::new();
    let mut items = Vec::new();

    if let Some(folder) = explorer.current_folder() {
        for child in &folder.children {
            labels.push(format!("▸ {} ({})", child.name, child.document_count));
            items.push(MenuItem::Folder(child.key.clone()));
        }
    }
    if !explorer.path().is_root() {
        labels.push("▴ Up".to_string());
        items.push(MenuItem::Up);
        labels.push("Jump to breadcrumb…".to_string());
        items.push(MenuItem::Crumb);
    }
    if !visible.is_empty() {
        labels.push(format!("Documents ({})…", visible.len()));
        items.push(MenuItem::Document);
    }
    labels.push("Search…".to_string());
    items.push(MenuItem::Search);
    if !explorer.query().trim().is_empty() {
        labels.push("Clear search".to_string());
        items.push(MenuItem::ClearSearch);
    }
    labels.push(format!("Switch to {} view", view_name(explorer.view().toggled())));
    items.push(MenuItem::ToggleView);
    labels.push("Show full tree".to_string());
    items.push(MenuItem::Tree);
    labels.push("Quit".to_string());
    items.push(MenuItem::Quit);

    (labels, items)
}

fn render(
    state: &AppState,
    explorer: &ExplorerState,
    documents: &[Document],
    visible: &[Document],
    changes: &[String],
) {
    for change in changes {
        output::print_success(change);
    }
    output::print_heading(&explorer.address_bar());
    if !explorer.query().trim().is_empty() {
        output::print_kv("Search", explorer.query().trim());
    }
    output::print_kv(
        "Showing",
        &format!("{} of {} documents", visible.len(), documents.len()),
    );
    println!();

    match explorer.view() {
        ViewMode::List => {
            let rows: Vec<DocumentRow> = visible
                .iter()
                .map(|doc| DocumentRow::new(doc, &state.projects))
                .collect();
            output::print_list(&rows, OutputFormat::Table);
        }
        ViewMode::Grid => {
            if visible.is_empty() {
                println!("No results found.");
            }
            for doc in visible {
                println!("  ▣ {}", doc.name);
                println!(
                    "      {} · v{} · {}",
                    doc.status,
                    doc.version,
                    output::format_size(doc.size_bytes)
                );
            }
        }
    }
    println!();
}

async fn document_menu(
    state: &AppState,
    ctx: &RequestContext,
    explorer: &mut ExplorerState,
    visible: &[Document],
) -> Result<(), AppError> {
    let names: Vec<String> = visible
        .iter()
        .map(|doc| format!("{}  [{}]", doc.name, doc.status))
        .collect();
    let Some(index) = select("Document", &names)? else {
        return Ok(());
    };
    let document = &visible[index];
    explorer.select(document.id.clone(), false);

    let actions = explorer.open_context_menu(document, ctx).actions.clone();
    let mut labels: Vec<String> = actions.iter().map(|a| action_label(*a).to_string()).collect();
    labels.push("Back".to_string());
    let choice = select(&document.name, &labels)?;
    explorer.close_context_menu();

    match choice.and_then(|i| actions.get(i).copied()) {
        Some(action) => run_action(state, ctx, document, action).await,
        None => Ok(()),
    }
}

async fn run_action(
    state: &AppState,
    ctx: &RequestContext,
    document: &Document,
    action: ContextAction,
) -> Result<(), AppError> {
    let id = &document.id;
    match action {
        ContextAction::Open => {
            let current = state.documents.get(ctx, id).await?;
            super::doc::print_document(state, &current);
        }
        ContextAction::Download => {
            output::print_warning(&format!(
                "'{}' ({}, {}) has no stored content to download",
                document.name,
                document.mime_type,
                output::format_size(document.size_bytes)
            ));
        }
        ContextAction::Rename => {
            let name = super::prompt_text("New name")?;
            let updated = state.documents.rename(ctx, id, &name).await?;
            output::print_success(&format!("Renamed to '{}'", updated.name));
        }
        ContextAction::EditTags => {
            let raw = super::prompt_text("Tags (comma separated)")?;
            let tags: BTreeSet<String> = raw.split(',').map(str::to_string).collect();
            state.documents.update_tags(ctx, id, tags).await?;
            output::print_success("Tags updated");
        }
        ContextAction::NewVersion => {
            let note = super::prompt_text("Change note")?;
            let request = AddVersionRequest {
                change_note: Some(note),
                size_bytes: document.size_bytes,
            };
            let updated = state.versions.add_version(ctx, id, request).await?;
            output::print_success(&format!("Now at version {}", updated.version));
        }
        ContextAction::Submit => {
            state.documents.submit_for_approval(ctx, id).await?;
            output::print_success("Submitted for approval");
        }
        ContextAction::Comment => noting(state, ctx, document, NotingAction::Comment, "Comment").await?,
        ContextAction::RequestRevision => {
            noting(state, ctx, document, NotingAction::RequestRevision, "What needs to change").await?
        }
        ContextAction::Approve => {
            noting(state, ctx, document, NotingAction::Approve, "Remark (optional)").await?
        }
        ContextAction::Reject => {
            noting(state, ctx, document, NotingAction::Reject, "Reason for rejection").await?
        }
        ContextAction::Delete => {
            if super::confirm(&format!("Delete '{}'?", document.name))? {
                state.documents.delete(ctx, id).await?;
                output::print_success(&format!("Deleted '{}'", document.name));
            }
        }
    }
    Ok(())
}

async fn noting(
    state: &AppState,
    ctx: &RequestContext,
    document: &Document,
    action: NotingAction,
    prompt: &str,
) -> Result<(), AppError> {
    let remark = super::prompt_text(prompt)?;
    let updated = state
        .noting
        .add_noting(ctx, &document.id, action, &remark)
        .await?;
    output::print_success(&format!("Recorded {} (status: {})", action, updated.status));
    Ok(())
}

fn select(prompt: &str, items: &[String]) -> Result<Option<usize>, AppError> {
    dialoguer::Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

fn action_label(action: ContextAction) -> &'static str {
    match action {
        ContextAction::Open => "Open",
        ContextAction::Download => "Download",
        ContextAction::Rename => "Rename…",
        ContextAction::EditTags => "Edit tags…",
        ContextAction::NewVersion => "Upload new version…",
        ContextAction::Submit => "Submit for approval",
        ContextAction::Comment => "Comment…",
        ContextAction::RequestRevision => "Request revision…",
        ContextAction::Approve => "Approve…",
        ContextAction::Reject => "Reject…",
        ContextAction::Delete => "Delete",
    }
}

fn view_name(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    }
}
