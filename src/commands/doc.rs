//! Document detail and workflow commands.
//!
//! Every command runs against the in-memory store built at startup, so
//! changes last for the lifetime of the process. Use `pmis explore` to chain
//! several changes in one session.

use std::collections::BTreeSet;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pmis_core::error::AppError;
use pmis_core::types::{DocumentId, ProjectId};
use pmis_entity::document::{
    CreateDocument, Discipline, Document, NotingAction, NotingEntry, Phase, VersionEntry,
};
use pmis_service::document::AddVersionRequest;
use pmis_service::{AppState, RequestContext};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocCommand {
    /// Show a document with its noting sheet and version history
    Show {
        /// Document ID
        id: String,
    },
    /// Show the noting sheet
    Notes {
        /// Document ID
        id: String,
    },
    /// Show the version history
    History {
        /// Document ID
        id: String,
    },
    /// Upload a new document as a draft
    Upload(UploadArgs),
    /// Submit a draft for approval
    Submit {
        /// Document ID
        id: String,
    },
    /// Approve a document
    Approve {
        /// Document ID
        id: String,
        /// Optional remark
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// Reject a document
    Reject {
        /// Document ID
        id: String,
        /// Reason for rejection (prompted when omitted)
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// Add a comment to the noting sheet
    Comment {
        /// Document ID
        id: String,
        /// Comment text (prompted when omitted)
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// Send a document back for revision
    Revise {
        /// Document ID
        id: String,
        /// What needs to change (prompted when omitted)
        #[arg(short, long)]
        remark: Option<String>,
    },
    /// Record a new version
    Version {
        /// Document ID
        id: String,
        /// Change note
        #[arg(short, long)]
        note: Option<String>,
        /// Size of the new file in bytes
        #[arg(short, long, default_value_t = 0)]
        size: u64,
    },
    /// Rename a document
    Rename {
        /// Document ID
        id: String,
        /// New name
        name: String,
    },
    /// Replace the tag set of a document
    Tag {
        /// Document ID
        id: String,
        /// New tags (none clears them)
        tags: Vec<String>,
    },
    /// Delete a document
    Delete {
        /// Document ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for `doc upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Document name, including extension
    #[arg(short, long)]
    pub name: String,
    /// Owning project ID
    #[arg(short, long)]
    pub project: String,
    /// Phase: Planning, Design, Execution, Closure
    #[arg(long)]
    pub phase: String,
    /// Discipline: Civil, Electrical, Mechanical, Plumbing, HVAC, General
    #[arg(long)]
    pub discipline: String,
    /// Category
    #[arg(long, default_value = "General")]
    pub category: String,
    /// Document type
    #[arg(long = "type", default_value = "Document")]
    pub doc_type: String,
    /// MIME type
    #[arg(long, default_value = "application/pdf")]
    pub mime: String,
    /// File size in bytes
    #[arg(long, default_value_t = 0)]
    pub size: u64,
    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Noting sheet display row
#[derive(Debug, Serialize, Tabled)]
struct NotingRow {
    /// When
    date: String,
    /// Author
    author: String,
    /// Role
    role: String,
    /// Action
    action: String,
    /// Remark
    remark: String,
}

impl From<&NotingEntry> for NotingRow {
    fn from(entry: &NotingEntry) -> Self {
        Self {
            date: entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
            author: entry.author_name.clone(),
            role: entry.author_role.to_string(),
            action: entry.action.to_string(),
            remark: entry.remark.clone(),
        }
    }
}

/// Version history display row
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    /// Version label
    version: String,
    /// Uploaded by
    uploaded_by: String,
    /// When
    date: String,
    /// Size
    size: String,
    /// Change note
    note: String,
}

impl From<&VersionEntry> for VersionRow {
    fn from(entry: &VersionEntry) -> Self {
        Self {
            version: entry.version.clone(),
            uploaded_by: entry.uploaded_by.to_string(),
            date: entry.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            size: output::format_size(entry.size_bytes),
            note: entry.change_note.clone().unwrap_or_default(),
        }
    }
}

/// Execute document commands
pub async fn execute(
    args: &DocArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        DocCommand::Show { id } => {
            let document = state.documents.get(ctx, &DocumentId::new(id.as_str())).await?;
            match format {
                OutputFormat::Table => print_document(state, &document),
                OutputFormat::Json => output::print_json(&document),
            }
        }
        DocCommand::Notes { id } => {
            let sheet = state
                .noting
                .noting_sheet(ctx, &DocumentId::new(id.as_str()))
                .await?;
            let rows: Vec<NotingRow> = sheet.iter().map(NotingRow::from).collect();
            output::print_list(&rows, format);
        }
        DocCommand::History { id } => {
            let history = state.versions.history(ctx, &DocumentId::new(id.as_str())).await?;
            let rows: Vec<VersionRow> = history.iter().map(VersionRow::from).collect();
            output::print_list(&rows, format);
        }
        DocCommand::Upload(upload) => {
            let request = CreateDocument {
                name: upload.name.clone(),
                doc_type: upload.doc_type.clone(),
                mime_type: upload.mime.clone(),
                category: upload.category.clone(),
                discipline: upload.discipline.parse::<Discipline>()?,
                phase: upload.phase.parse::<Phase>()?,
                project_id: ProjectId::new(upload.project.as_str()),
                tags: upload.tags.iter().cloned().collect(),
                description: upload.description.clone(),
                size_bytes: upload.size,
            };
            let document = state.documents.upload(ctx, request).await?;
            report(&document, &format!("Uploaded '{}' as {}", document.name, document.id), format);
        }
        DocCommand::Submit { id } => {
            let document = state
                .documents
                .submit_for_approval(ctx, &DocumentId::new(id.as_str()))
                .await?;
            report(&document, &format!("'{}' submitted for approval", document.name), format);
        }
        DocCommand::Approve { id, remark } => {
            let remark = remark.clone().unwrap_or_default();
            note(state, ctx, id, NotingAction::Approve, remark, format).await?;
        }
        DocCommand::Reject { id, remark } => {
            let remark = remark_or_prompt(remark, "Reason for rejection")?;
            note(state, ctx, id, NotingAction::Reject, remark, format).await?;
        }
        DocCommand::Comment { id, remark } => {
            let remark = remark_or_prompt(remark, "Comment")?;
            note(state, ctx, id, NotingAction::Comment, remark, format).await?;
        }
        DocCommand::Revise { id, remark } => {
            let remark = remark_or_prompt(remark, "What needs to change")?;
            note(state, ctx, id, NotingAction::RequestRevision, remark, format).await?;
        }
        DocCommand::Version { id, note, size } => {
            let request = AddVersionRequest {
                change_note: note.clone(),
                size_bytes: *size,
            };
            let document = state
                .versions
                .add_version(ctx, &DocumentId::new(id.as_str()), request)
                .await?;
            report(
                &document,
                &format!("'{}' is now at version {}", document.name, document.version),
                format,
            );
        }
        DocCommand::Rename { id, name } => {
            let document = state
                .documents
                .rename(ctx, &DocumentId::new(id.as_str()), name)
                .await?;
            report(&document, &format!("Renamed to '{}'", document.name), format);
        }
        DocCommand::Tag { id, tags } => {
            let tags: BTreeSet<String> = tags.iter().cloned().collect();
            let document = state
                .documents
                .update_tags(ctx, &DocumentId::new(id.as_str()), tags)
                .await?;
            let joined: Vec<&str> = document.tags.iter().map(String::as_str).collect();
            report(&document, &format!("Tags set to [{}]", joined.join(", ")), format);
        }
        DocCommand::Delete { id, yes } => {
            let doc_id = DocumentId::new(id.as_str());
            let existing = state.documents.get(ctx, &doc_id).await?;
            if !yes && !super::confirm(&format!("Delete '{}'?", existing.name))? {
                output::print_warning("Aborted");
                return Ok(());
            }
            let removed = state.documents.delete(ctx, &doc_id).await?;
            report(&removed, &format!("Deleted '{}'", removed.name), format);
        }
    }

    Ok(())
}

async fn note(
    state: &AppState,
    ctx: &RequestContext,
    id: &str,
    action: NotingAction,
    remark: String,
    format: OutputFormat,
) -> Result<(), AppError> {
    let document = state
        .noting
        .add_noting(ctx, &DocumentId::new(id), action, &remark)
        .await?;
    report(
        &document,
        &format!("Recorded {} on '{}' (status: {})", action, document.name, document.status),
        format,
    );
    Ok(())
}

fn remark_or_prompt(remark: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match remark {
        Some(r) => Ok(r.clone()),
        None => super::prompt_text(prompt),
    }
}

fn report(document: &Document, message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => output::print_success(message),
        OutputFormat::Json => output::print_json(document),
    }
}

pub(crate) fn print_document(state: &AppState, doc: &Document) {
    let project = state
        .projects
        .find(&doc.project_id)
        .map(|p| format!("{} ({})", p.name, p.id))
        .unwrap_or_else(|| format!("{} (unknown)", doc.project_id));
    let tags: Vec<&str> = doc.tags.iter().map(String::as_str).collect();

    output::print_heading(&doc.name);
    output::print_kv("ID", doc.id.as_str());
    output::print_kv("Project", &project);
    output::print_kv("Folder", &format!("{} / {}", doc.phase, doc.discipline));
    output::print_kv("Type", &format!("{} ({})", doc.doc_type, doc.mime_type));
    output::print_kv("Category", &doc.category);
    output::print_kv("Status", doc.status.as_str());
    output::print_kv("Version", &doc.version);
    output::print_kv("Size", &output::format_size(doc.size_bytes));
    output::print_kv("Uploaded", &doc.uploaded_at.format("%Y-%m-%d %H:%M").to_string());
    output::print_kv("Uploaded by", &format!("{} ({})", doc.uploaded_by, doc.uploader_role));
    output::print_kv("Tags", &tags.join(", "));
    if let Some(description) = &doc.description {
        output::print_kv("Description", description);
    }

    output::print_heading("Noting sheet");
    let notes: Vec<NotingRow> = doc.noting_sheet.iter().map(NotingRow::from).collect();
    output::print_list(&notes, OutputFormat::Table);

    output::print_heading("Version history");
    let versions: Vec<VersionRow> = doc.version_history.iter().map(VersionRow::from).collect();
    output::print_list(&versions, OutputFormat::Table);
}
