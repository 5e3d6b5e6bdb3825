//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod doc;
pub mod explore;
pub mod list;
pub mod report;
pub mod tree;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use pmis_core::config::AppConfig;
use pmis_core::error::AppError;
use pmis_service::{AppState, RequestContext};

/// PMIS project document explorer
#[derive(Debug, Parser)]
#[command(name = "pmis", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Act as this user instead of the configured default
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Load documents from this JSON seed instead of the configured one
    #[arg(long, global = true)]
    pub seed: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the folder tree
    Tree(tree::TreeArgs),
    /// Print the breadcrumb trail of a folder
    Crumbs(tree::CrumbsArgs),
    /// List documents under a folder, optionally searching
    List(list::ListArgs),
    /// Document details and workflow actions
    Doc(doc::DocArgs),
    /// Dashboard reports
    Report(report::ReportArgs),
    /// Current user, users, and role capabilities
    Auth(auth::AuthArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Browse documents interactively
    Explore(explore::ExploreArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, &self.config, self.format).await;
        }

        let (state, ctx) = self.open_session(config).await?;
        match &self.command {
            Commands::Tree(args) => tree::execute(args, &state, &ctx, self.format).await,
            Commands::Crumbs(args) => tree::execute_crumbs(args, &state, &ctx, self.format).await,
            Commands::List(args) => list::execute(args, &state, &ctx, self.format).await,
            Commands::Doc(args) => doc::execute(args, &state, &ctx, self.format).await,
            Commands::Report(args) => report::execute(args, &state, &ctx, self.format).await,
            Commands::Auth(args) => auth::execute(args, &state, &ctx, self.format).await,
            Commands::Explore(args) => explore::execute(args, &state, &ctx).await,
            Commands::Config(_) => Ok(()),
        }
    }

    /// Build the application state and log in as the selected user.
    async fn open_session(&self, config: AppConfig) -> Result<(AppState, RequestContext), AppError> {
        let username = self
            .user
            .clone()
            .unwrap_or_else(|| config.auth.default_user.clone());
        let state = AppState::bootstrap(config)?;
        let ctx = state.login(&username).await?;
        tracing::debug!(user = %ctx.username, role = %ctx.role, "CLI session opened");
        Ok((state, ctx))
    }
}

/// Helper: load configuration from file, applying command-line overrides
pub fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(seed) = &cli.seed {
        config.edms.seed_path = Some(seed.clone());
    }
    Ok(config)
}

/// Helper: ask for a line of text, allowing an empty answer
pub fn prompt_text(prompt: &str) -> Result<String, AppError> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Helper: ask a yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
