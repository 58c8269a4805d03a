//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + SUPABASE_* environment
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → shared via ArcSwap with the HTTP handlers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of Arc<SiteConfig>
//!     → next render observes the new navigation and site metadata
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Bind addresses are read once at startup; reload does not rebind

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    DemoConfig, HeroImage, ImageConfig, NavEntry, ObservabilityConfig, ServerConfig, SiteConfig, SiteMeta,
    SupabaseConfig,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
