//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, `Route` rejects malformed hrefs)
//! - Detect duplicate navigation targets
//! - Validate value ranges (timeouts > 0, demo range ordered)
//! - Validate addresses and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("duplicate navigation href {0:?}")]
    DuplicateNavHref(String),

    #[error("navigation entry for {0:?} has an empty label")]
    EmptyNavLabel(String),

    #[error("demo.min ({min}) must not exceed demo.max ({max})")]
    DemoRange { min: u32, max: u32 },

    #[error("invalid {field} URL {value:?}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("supabase.url and supabase.anon_key must be set together")]
    PartialSupabase,
}

pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "server.request_timeout_secs",
        });
    }

    let mut seen = HashSet::new();
    for entry in &config.navigation {
        if !seen.insert(entry.href.as_str()) {
            errors.push(ValidationError::DuplicateNavHref(entry.href.to_string()));
        }
        if entry.label.trim().is_empty() {
            errors.push(ValidationError::EmptyNavLabel(entry.href.to_string()));
        }
    }

    if config.demo.min > config.demo.max {
        errors.push(ValidationError::DemoRange {
            min: config.demo.min,
            max: config.demo.max,
        });
    }

    if config.images.placeholder_size == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "images.placeholder_size",
        });
    }
    if config.images.fetch_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "images.fetch_timeout_secs",
        });
    }
    if let Some(base) = &config.images.base_url {
        check_url(&mut errors, "images.base_url", base);
    }

    match (&config.supabase.url, &config.supabase.anon_key) {
        (Some(url), Some(_)) => check_url(&mut errors, "supabase.url", url),
        (None, None) => {}
        _ => errors.push(ValidationError::PartialSupabase),
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}
