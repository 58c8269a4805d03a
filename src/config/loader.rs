//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `supabase.url`.
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable overriding `supabase.anon_key`.
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
///
/// `env` resolves environment overrides; pass `|_| None` to ignore them.
pub fn parse_config<F>(content: &str, env: F) -> Result<SiteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    apply_env_overrides(&mut config, env);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content, |key| std::env::var(key).ok())
}

/// Load `path` when given, otherwise validated defaults plus environment.
pub fn load_or_default(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => parse_config("", |key| std::env::var(key).ok()),
    }
}

fn apply_env_overrides<F>(config: &mut SiteConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(SUPABASE_URL_ENV).filter(|v| !v.is_empty()) {
        config.supabase.url = Some(url);
    }
    if let Some(key) = env(SUPABASE_ANON_KEY_ENV).filter(|v| !v.is_empty()) {
        config.supabase.anon_key = Some(key);
    }
}
