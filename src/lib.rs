//! Server-rendered site starter: navigation links with active-state
//! styling, shared UI components, a random-count demo, and Supabase
//! session plumbing.

pub mod config;
pub mod demo;
pub mod fonts;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod supabase;
pub mod ui;
pub mod util;

pub use config::schema::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{is_active, MatchMode, Route};
pub use ui::NavLink;
