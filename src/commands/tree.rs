//! Folder tree and breadcrumb commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pmis_core::error::AppError;
use pmis_entity::folder::ROOT_ID;
use pmis_service::edms::{FolderPath, breadcrumbs};
use pmis_service::{AppState, RequestContext};

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Folder to start from
    #[arg(short, long, default_value = ROOT_ID)]
    pub path: String,

    /// Show folder ids next to labels
    #[arg(long)]
    pub ids: bool,
}

/// Arguments for the crumbs command
#[derive(Debug, Args)]
pub struct CrumbsArgs {
    /// Folder id, e.g. `proj-1-Design-Civil`
    pub id: String,
}

/// Breadcrumb display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CrumbRow {
    /// Depth below the root
    level: usize,
    /// Folder id
    id: String,
    /// Label
    label: String,
    /// Documents under the folder
    documents: u64,
}

/// Execute the tree command
pub async fn execute(
    args: &TreeArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (explorer, _) = state.open_explorer(ctx).await?;
    let tree = explorer.tree();
    let path = FolderPath::resolve(tree, &args.path);
    let node = tree
        .get_key(path.selected())
        .ok_or_else(|| AppError::not_found(format!("Folder '{}' not found", args.path)))?;

    match format {
        OutputFormat::Table => print!("{}", output::render_tree(node, args.ids)),
        OutputFormat::Json => output::print_json(node),
    }
    Ok(())
}

/// Execute the crumbs command
pub async fn execute_crumbs(
    args: &CrumbsArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (explorer, _) = state.open_explorer(ctx).await?;
    let path = FolderPath::resolve(explorer.tree(), &args.id);

    let rows: Vec<CrumbRow> = breadcrumbs(explorer.tree(), &path)
        .into_iter()
        .enumerate()
        .map(|(level, crumb)| CrumbRow {
            level,
            id: crumb.id,
            label: crumb.label,
            documents: crumb.document_count,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
