//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Route;

/// Default `sizes` attribute for responsive images.
pub const DEFAULT_IMAGE_SIZES: &str = "(max-width: 768px) 100vw, (max-width: 1200px) 50vw, 33vw";

/// Root configuration for the site.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Server configuration (bind address, timeouts).
    pub server: ServerConfig,

    /// Document-level settings (title, language).
    pub site: SiteMeta,

    /// Navigation bar entries, rendered in order.
    pub navigation: Vec<NavEntry>,

    /// Random count demo settings.
    pub demo: DemoConfig,

    /// Image placeholder settings.
    pub images: ImageConfig,

    /// Supabase project settings.
    pub supabase: SupabaseConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteMeta::default(),
            navigation: default_navigation(),
            demo: DemoConfig::default(),
            images: ImageConfig::default(),
            supabase: SupabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteMeta {
    /// Document title.
    pub title: String,

    /// `lang` attribute of the root element.
    pub lang: String,

    /// Optional image shown above the demo on the home page.
    pub hero_image: Option<HeroImage>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Next.js 프로젝트 템플릿".to_string(),
            lang: "ko-KR".to_string(),
            hero_image: None,
        }
    }
}

/// An image with its alternative text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeroImage {
    pub src: String,
    pub alt: String,
}

/// One navigation bar entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavEntry {
    /// Visible link text.
    pub label: String,

    /// Destination route.
    pub href: Route,

    /// Only the exact path is active.
    #[serde(default)]
    pub exact: bool,

    /// Render as a non-navigable link.
    #[serde(default)]
    pub disabled: bool,

    /// Base classes.
    #[serde(default)]
    pub class: Option<String>,

    /// Classes when active (default "active").
    #[serde(default)]
    pub active_class: Option<String>,

    /// Classes when inactive.
    #[serde(default)]
    pub inactive_class: Option<String>,

    /// Classes when disabled (default "cursor-not-allowed opacity-50").
    #[serde(default)]
    pub disabled_class: Option<String>,
}

impl NavEntry {
    pub fn new(label: impl Into<String>, href: Route) -> Self {
        Self {
            label: label.into(),
            href,
            exact: false,
            disabled: false,
            class: None,
            active_class: None,
            inactive_class: None,
            disabled_class: None,
        }
    }
}

fn default_navigation() -> Vec<NavEntry> {
    let mut home = NavEntry::new("홈", Route::root());
    home.exact = true;
    vec![
        home,
        NavEntry::new("소개", known_route("/about")),
        NavEntry::new("블로그", known_route("/blog")),
    ]
}

fn known_route(path: &'static str) -> Route {
    Route::new(path).unwrap_or_else(|_| Route::root())
}

/// Random count demo configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Smallest count (inclusive).
    pub min: u32,

    /// Largest count (inclusive).
    pub max: u32,

    /// Delay before the document title reflects a new count.
    pub title_debounce_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 10,
            title_debounce_ms: 30,
        }
    }
}

/// Image placeholder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Placeholder width in pixels.
    pub placeholder_size: u32,

    /// Image fetch timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// `sizes` attribute for rendered images.
    pub sizes: String,

    /// Base URL for relative image sources.
    pub base_url: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            placeholder_size: 10,
            fetch_timeout_secs: 10,
            sizes: DEFAULT_IMAGE_SIZES.to_string(),
            base_url: None,
        }
    }
}

/// Supabase project configuration.
///
/// `SUPABASE_URL` and `SUPABASE_ANON_KEY` override these values.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://abcd.supabase.co").
    pub url: Option<String>,

    /// Public anonymous key.
    pub anon_key: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
