//! Dashboard report commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pmis_core::error::AppError;
use pmis_entity::folder::FolderKey;
use pmis_service::{AppState, RequestContext};

/// Arguments for report commands
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report subcommand
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// Report subcommands
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Document counts by status, phase, and discipline
    Stats,
    /// Projects with their document counts
    Projects,
}

/// Statistics display row
#[derive(Debug, Serialize, Tabled)]
struct StatRow {
    /// Section
    section: String,
    /// Label
    label: String,
    /// Count
    count: u64,
}

/// Project display row
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    /// Project ID
    id: String,
    /// Contract code
    code: String,
    /// Name
    name: String,
    /// Status
    status: String,
    /// Location
    location: String,
    /// Documents
    documents: u64,
}

/// Execute report commands
pub async fn execute(
    args: &ReportArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ReportCommand::Stats => {
            let stats = state.stats(ctx).await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<StatRow> = stats
                        .rows()
                        .into_iter()
                        .map(|(section, entry)| StatRow {
                            section: section.to_string(),
                            label: entry.label,
                            count: entry.count,
                        })
                        .collect();
                    output::print_list(&rows, format);
                    output::print_kv("Total size", &output::format_size(stats.total_size_bytes));
                }
                OutputFormat::Json => output::print_json(&stats),
            }
        }
        ReportCommand::Projects => {
            let (explorer, _) = state.open_explorer(ctx).await?;
            let rows: Vec<ProjectRow> = state
                .projects
                .projects()
                .iter()
                .filter(|p| ctx.can_access_project(&p.id))
                .map(|p| ProjectRow {
                    id: p.id.to_string(),
                    code: p.code.clone(),
                    name: p.name.clone(),
                    status: format!("{:?}", p.status),
                    location: p.location.clone().unwrap_or_default(),
                    documents: explorer
                        .tree()
                        .get_key(&FolderKey::project(p.id.clone()))
                        .map(|node| node.document_count)
                        .unwrap_or(0),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
