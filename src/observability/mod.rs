//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every log event
//! - Request ID flows through the trace layer span
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
