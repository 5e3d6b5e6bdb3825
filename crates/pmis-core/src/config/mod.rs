//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field carries a serde default so a missing file still
//! yields a usable configuration.

pub mod auth;
pub mod edms;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::edms::EdmsConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document explorer settings.
    #[serde(default)]
    pub edms: EdmsConfig,
    /// Login and role lookup settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file (optional), an environment overlay found next
    /// to it as `{env}.toml` when `PMIS_ENV` is set, and environment
    /// variables prefixed with `PMIS__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false));

        if let Ok(env) = std::env::var("PMIS_ENV") {
            let overlay = Path::new(path)
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(format!("{env}.toml"));
            builder = builder.add_source(config::File::from(overlay).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("PMIS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist.toml").expect("defaults");
        assert_eq!(config.edms.unknown_project_label, "Unknown Project");
        assert_eq!(config.edms.root_label, "All Documents");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "[edms]\nroot_label = \"Everything\"\ndefault_view = \"list\"\n\n[logging]\nformat = \"pretty\""
        )
        .expect("write");

        let path = file.path().to_str().expect("utf8 path").to_string();
        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.edms.root_label, "Everything");
        assert_eq!(config.edms.default_view, edms::ViewMode::List);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.edms.unknown_project_label, "Unknown Project");
    }
}
