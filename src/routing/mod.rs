//! Route active-state resolution.
//!
//! # Data Flow
//! ```text
//! Current location (request path, supplied by the caller)
//!     → route.rs (validated Route values)
//!     → matcher.rs (Exact / PrefixOrExact evaluation)
//!     → Return: is_active bool
//! ```
//!
//! # Design Decisions
//! - Current location is an explicit argument, never ambient state
//! - Matching is pure string comparison, no query-string normalization
//! - The root route `/` only matches by equality, never by prefix
//! - Case-sensitive (paths are case-sensitive)

pub mod matcher;
pub mod route;

pub use matcher::{is_active, ExactMatcher, MatchMode, Matcher, PrefixOrExactMatcher};
pub use route::{Route, RouteError};
