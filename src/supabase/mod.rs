//! Supabase integration.
//!
//! # Data Flow
//! ```text
//! SUPABASE_URL / SUPABASE_ANON_KEY (or [supabase] config)
//!     → info.rs (validated project URL + anon key)
//!
//! Page request:
//!     → middleware.rs (request cookies → ResponseCookieStore)
//!     → session.rs (decode sb-<ref>-auth-token, check expiry)
//!     → client.rs auth().refresh_session() when close to expiry
//!     → Set-Cookie headers appended to the response
//!
//! Handlers:
//!     → client.rs create_server_client(RequestCookieStore)
//!     → from(table) / table::<T>() queries against PostgREST
//! ```
//!
//! # Design Decisions
//! - Cookie storage is a trait so the client works over request-only and
//!   response-writing stores alike
//! - A server client over read-only cookies swallows write failures; the
//!   middleware is responsible for persisting refreshed sessions
//! - Session cookies are base64url encoded and chunked when large

pub mod client;
pub mod cookies;
pub mod info;
pub mod middleware;
pub mod schema;
pub mod session;

use thiserror::Error;

pub use client::{Auth, QueryBuilder, SupabaseClient};
pub use cookies::{CookieOptions, CookieStore, CookieToSet, RequestCookieStore, ResponseCookieStore};
pub use info::SupabaseInfo;
pub use session::{Session, User};

/// Errors from the Supabase integration.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Supabase URL and anon key must be set (SUPABASE_URL, SUPABASE_ANON_KEY)")]
    MissingCredentials,

    #[error("invalid Supabase URL {0:?}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supabase returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid session data: {0}")]
    Session(String),

    #[error("cookie store error: {0}")]
    CookieStore(String),

    #[error("no active session")]
    NoSession,
}
