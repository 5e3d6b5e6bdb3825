//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use pmis_core::config::AppConfig;
use pmis_core::error::AppError;
use pmis_entity::user::UserRole;
use pmis_service::Seed;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and the seed it points at
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => match validate(config) {
            Ok(seed) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                output::print_kv(
                    "Seed",
                    config.edms.seed_path.as_deref().unwrap_or("(embedded)"),
                );
                output::print_kv("Projects", &seed.projects.len().to_string());
                output::print_kv("Users", &seed.users.len().to_string());
                output::print_kv("Documents", &seed.documents.len().to_string());
                output::print_kv("Default user", &config.auth.default_user);
                output::print_kv("Default view", &format!("{:?}", config.edms.default_view));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn validate(config: &AppConfig) -> Result<Seed, AppError> {
    config.auth.guest_role.parse::<UserRole>()?;
    if config.edms.event_buffer == 0 {
        return Err(AppError::configuration("edms.event_buffer must be at least 1"));
    }

    let seed = Seed::load(config.edms.seed_path.as_deref())?;
    if !seed
        .users
        .iter()
        .any(|u| u.username == config.auth.default_user)
        && !config.auth.allow_guest
    {
        return Err(AppError::configuration(format!(
            "Default user '{}' is not in the seed and guests are not allowed",
            config.auth.default_user
        )));
    }
    Ok(seed)
}
