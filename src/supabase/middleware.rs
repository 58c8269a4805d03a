//! Session refresh middleware.
//!
//! # Responsibilities
//! - Read the auth session from request cookies
//! - Refresh it when the access token is expired or about to expire
//! - Forward the refreshed cookies to the handler and the browser
//!
//! # Design Decisions
//! - Requests without a session pass through untouched
//! - A failed refresh is logged and the request continues unauthenticated
//! - Only this middleware writes session cookies to responses

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::supabase::client::SupabaseClient;
use crate::supabase::cookies::ResponseCookieStore;
use crate::supabase::info::SupabaseInfo;
use crate::supabase::session::now_secs;

/// Refresh the session carried by `request`, run `next`, and persist any
/// cookie changes on the response.
pub async fn refresh_and_run(info: &SupabaseInfo, mut request: Request<Body>, next: Next) -> Response {
    let store = Arc::new(ResponseCookieStore::from_headers(request.headers()));

    match SupabaseClient::create_server_client(info.clone(), store.clone()) {
        Ok(client) => {
            if let Some(session) = client.session() {
                if session.needs_refresh(now_secs()) {
                    if let Err(e) = client.auth().refresh_session().await {
                        tracing::warn!(error = %e, "Supabase session refresh failed");
                    }
                }
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to create Supabase client"),
    }

    if store.has_changes() {
        store.apply_to_request(request.headers_mut());
    }

    let mut response = next.run(request).await;

    match store.set_cookie_headers() {
        Ok(values) => {
            for value in values {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to serialize session cookies"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::session::Session;
    use axum::{extract::State, middleware, routing::get, Router};
    use axum_extra::extract::cookie::CookieJar;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(info: SupabaseInfo) -> Router {
        let name = info.session_cookie_name();
        Router::new()
            .route(
                "/",
                get(move |jar: CookieJar| {
                    let name = name.clone();
                    async move {
                        jar.get(&name)
                            .and_then(|c| Session::decode(c.value()).ok())
                            .map(|s| s.access_token)
                            .unwrap_or_else(|| "anonymous".to_string())
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(
                Arc::new(info),
                |State(info): State<Arc<SupabaseInfo>>, request: Request<Body>, next: Next| async move {
                    refresh_and_run(&info, request, next).await
                },
            ))
    }

    fn session(expires_at: i64) -> Session {
        Session {
            access_token: "old-access".into(),
            refresh_token: "old-refresh".into(),
            expires_in: None,
            expires_at: Some(expires_at),
            token_type: "bearer".into(),
            user: None,
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_passes_through_without_session() {
        let info = SupabaseInfo::new("http://127.0.0.1:9", "anon").unwrap();
        let response = app(info)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_fresh_session_is_not_refreshed() {
        let info = SupabaseInfo::new("http://127.0.0.1:9", "anon").unwrap();
        let cookie = format!(
            "{}={}",
            info.session_cookie_name(),
            session(now_secs() + 3600).encode().unwrap()
        );
        let response = app(info)
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_text(response).await, "old-access");
    }

    #[tokio::test]
    async fn test_expired_session_is_refreshed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "refresh_token": "new-refresh",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let cookie = format!(
            "{}={}",
            info.session_cookie_name(),
            session(now_secs() - 10).encode().unwrap()
        );
        let response = app(info.clone())
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with(&format!("{}=base64-", info.session_cookie_name())));
        assert_eq!(body_text(response).await, "new-access");
    }

    #[tokio::test]
    async fn test_failed_refresh_continues() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid refresh token"))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let cookie = format!(
            "{}={}",
            info.session_cookie_name(),
            session(0).encode().unwrap()
        );
        let response = app(info)
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_text(response).await, "old-access");
    }
}
