//! Request identification.
//!
//! # Responsibilities
//! - Assign a UUID v4 `x-request-id` to requests that arrive without one
//! - Echo the id on the response
//! - Expose the id to handlers for logging
//!
//! # Design Decisions
//! - A client-supplied id is kept, so ids can be correlated across hops
//! - Request ID added as early as possible for tracing

use axum::http::{HeaderName, Request};
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layers that set and propagate `x-request-id`.
pub type RequestIdLayer =
    Stack<PropagateRequestIdLayer, Stack<SetRequestIdLayer<MakeRequestUuid>, Identity>>;

pub fn request_id_layer() -> ServiceBuilder<RequestIdLayer> {
    let header = HeaderName::from_static(X_REQUEST_ID);
    ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(header))
}

/// Access to the request id assigned by [`request_id_layer`].
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
