//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign / propagate x-request-id)
//!     → server.rs (timeout, trace, metrics, session refresh)
//!     → handler picks page or API endpoint from the current SiteState
//!     → pages.rs (layout + nav bar + page body)
//!     → HTML / JSON / CSS response
//! ```

pub mod pages;
pub mod request;
pub mod server;

pub use request::{request_id_layer, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError, SiteState};
