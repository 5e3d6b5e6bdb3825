//! Session, user, and role commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pmis_auth::{Capability, RbacPolicies};
use pmis_core::error::AppError;
use pmis_entity::user::UserRole;
use pmis_service::{AppState, RequestContext};

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Show the acting user and their capabilities
    Whoami,
    /// List known users
    Users,
    /// Show the capabilities of every role
    Roles,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Display name
    name: String,
    /// Role
    role: String,
    /// Department
    department: String,
    /// Assigned projects
    projects: String,
}

/// Role display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role
    role: String,
    /// Capabilities
    capabilities: String,
}

/// Execute auth commands
pub async fn execute(
    args: &AuthArgs,
    state: &AppState,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AuthCommand::Whoami => match format {
            OutputFormat::Table => {
                let projects = if ctx.projects.is_empty() {
                    "all".to_string()
                } else {
                    join(ctx.projects.iter().map(|p| p.to_string()))
                };
                output::print_kv("User", &format!("{} ({})", ctx.display_name, ctx.username));
                output::print_kv("Role", ctx.role.as_str());
                output::print_kv("Projects", &projects);
                output::print_kv("Capabilities", &join(ctx.capabilities.iter().map(|c| c.to_string())));
            }
            OutputFormat::Json => output::print_json(ctx),
        },
        AuthCommand::Users => {
            state.rbac.require(&ctx.role, Capability::ManageUsers)?;
            let rows: Vec<UserRow> = state
                .sessions
                .directory()
                .users()
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    username: u.username.clone(),
                    name: u.display_name.clone(),
                    role: u.role.to_string(),
                    department: u.department.clone().unwrap_or_default(),
                    projects: if u.is_programme_wide() {
                        "all".to_string()
                    } else {
                        join(u.projects.iter().map(|p| p.to_string()))
                    },
                })
                .collect();
            output::print_list(&rows, format);
        }
        AuthCommand::Roles => {
            let policies = RbacPolicies::new();
            let rows: Vec<RoleRow> = UserRole::ALL
                .iter()
                .map(|role| {
                    let mut caps: Vec<Capability> =
                        policies.capabilities_for_role(role).into_iter().collect();
                    caps.sort();
                    RoleRow {
                        role: role.to_string(),
                        capabilities: join(caps.iter().map(|c| c.to_string())),
                    }
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
