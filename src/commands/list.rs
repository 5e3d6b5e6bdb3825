//! Document listing with folder and free-text filtering.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pmis_core::error::AppError;
use pmis_entity::document::Document;
use pmis_entity::folder::ROOT_ID;
use pmis_service::edms::explorer::ADDRESS_SEPARATOR;
use pmis_service::edms::{FolderPath, apply_filter, breadcrumbs};
use pmis_service::{AppState, ProjectRegistry, RequestContext};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Folder to list, e.g. `proj-1` or `proj-1-Design-Civil`
    #[arg(short, long, default_value = ROOT_ID)]
    pub path: String,

    /// Search text matched against name, category, tags, and description
    #[arg(short, long, default_value = "")]
    pub query: String,
}

/// Document display row for table output
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct DocumentRow {
    /// Document ID
    pub id: String,
    /// Name
    pub name: String,
    /// Project
    pub project: String,
    /// Phase
    pub phase: String,
    /// Discipline
    pub discipline: String,
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Size
    pub size: String,
}

impl DocumentRow {
    pub(crate) fn new(doc: &Document, projects: &ProjectRegistry) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            project: projects
                .find(&doc.project_id)
                .map(|p| p.code.clone())
                .unwrap_or_else(|| doc.project_id.to_string()),
            phase: doc.phase.to_string(),
            discipline: doc.discipline.to_string(),
            status: doc.status.to_string(),
            version: doc.version.clone(),
            size: output::format_size(doc.size_bytes),
        }
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (explorer, documents) = state.open_explorer(ctx).await?;
    let path = FolderPath::resolve(explorer.tree(), &args.path);
    let matches = apply_filter(&documents, &path, &args.query);

    if format == OutputFormat::Table {
        let location: Vec<String> = breadcrumbs(explorer.tree(), &path)
            .into_iter()
            .map(|crumb| crumb.label)
            .collect();
        output::print_kv("Location", &location.join(ADDRESS_SEPARATOR));
        if !args.query.trim().is_empty() {
            output::print_kv("Search", args.query.trim());
        }
        output::print_kv("Documents", &format!("{} of {}", matches.len(), documents.len()));
        println!();
    }

    let rows: Vec<DocumentRow> = matches
        .iter()
        .map(|doc| DocumentRow::new(doc, &state.projects))
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
