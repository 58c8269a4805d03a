//! Supabase REST and auth client.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::supabase::cookies::CookieStore;
use crate::supabase::info::SupabaseInfo;
use crate::supabase::schema::Table;
use crate::supabase::session::{now_secs, Session, User};
use crate::supabase::SupabaseError;

/// Client for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    info: SupabaseInfo,
    http: reqwest::Client,
    cookies: Option<Arc<dyn CookieStore>>,
}

impl SupabaseClient {
    /// A client without cookie storage, authenticated with the anon key.
    pub fn create_browser_client(info: SupabaseInfo) -> Result<Self, SupabaseError> {
        Ok(Self {
            info,
            http: reqwest::Client::builder().build()?,
            cookies: None,
        })
    }

    /// A client that reads the session from, and writes refreshed
    /// sessions to, `cookies`.
    pub fn create_server_client(
        info: SupabaseInfo,
        cookies: Arc<dyn CookieStore>,
    ) -> Result<Self, SupabaseError> {
        Ok(Self {
            info,
            http: reqwest::Client::builder().build()?,
            cookies: Some(cookies),
        })
    }

    pub fn info(&self) -> &SupabaseInfo {
        &self.info
    }

    /// The session stored in cookies, if any. Undecodable cookies count as none.
    pub fn session(&self) -> Option<Session> {
        let store = self.cookies.as_ref()?;
        match Session::from_cookies(&store.get_all(), &self.info.session_cookie_name()) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session cookie");
                None
            }
        }
    }

    /// Persist `session` through the cookie store.
    ///
    /// Stores that cannot be written (rendering contexts) are ignored; the
    /// session middleware persists refreshed sessions instead.
    fn store_session(&self, session: &Session) -> Result<(), SupabaseError> {
        let Some(store) = &self.cookies else {
            return Ok(());
        };
        let cookies = session.to_cookies(&self.info.session_cookie_name(), &store.get_all())?;
        if let Err(e) = store.set_all(cookies) {
            tracing::debug!(error = %e, "Session cookies not written from this context");
        }
        Ok(())
    }

    fn headers(&self, access_token: Option<&str>) -> Result<HeaderMap, SupabaseError> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| {
            SupabaseError::Session(format!("invalid header value: {e}"))
        };
        let token = access_token.unwrap_or(&self.info.anon_key);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.info.anon_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(invalid)?,
        );
        Ok(headers)
    }

    fn request_headers(&self) -> Result<HeaderMap, SupabaseError> {
        let session = self.session();
        self.headers(session.as_ref().map(|s| s.access_token.as_str()))
    }

    /// Query builder for `table`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder {
            client: self,
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Query builder for a typed table.
    pub fn table<T: Table>(&self) -> QueryBuilder<'_> {
        self.from(T::NAME)
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SupabaseError::Status {
        status: status.as_u16(),
        message,
    })
}

/// A PostgREST query against one table.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    client: &'a SupabaseClient,
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl<'a> QueryBuilder<'a> {
    /// Columns to return, PostgREST syntax (default `*`).
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn url(&self) -> String {
        self.client.info.endpoint(&format!("rest/v1/{}", self.table))
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![("select".to_string(), self.select.clone())];
        query.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            query.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }

    /// Run the query and decode the rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, SupabaseError> {
        tracing::debug!(table = %self.table, "Supabase select");
        let response = self
            .client
            .http
            .get(self.url())
            .headers(self.client.request_headers()?)
            .query(&self.query())
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Insert rows without returning them.
    pub async fn insert<T: Serialize>(self, rows: &[T]) -> Result<(), SupabaseError> {
        tracing::debug!(table = %self.table, rows = rows.len(), "Supabase insert");
        let response = self
            .client
            .http
            .post(self.url())
            .headers(self.client.request_headers()?)
            .header("Prefer", "return=minimal")
            .header(CONTENT_TYPE, "application/json")
            .json(rows)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Apply `changes` to the rows matching the filters.
    pub async fn update<T: Serialize>(self, changes: &T) -> Result<(), SupabaseError> {
        tracing::debug!(table = %self.table, "Supabase update");
        let query: Vec<(String, String)> = self.filters.clone();
        let response = self
            .client
            .http
            .patch(self.url())
            .headers(self.client.request_headers()?)
            .header("Prefer", "return=minimal")
            .query(&query)
            .json(changes)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Auth (GoTrue) operations.
#[derive(Debug)]
pub struct Auth<'a> {
    client: &'a SupabaseClient,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl Auth<'_> {
    /// The signed-in user, validated against the auth server.
    ///
    /// `Ok(None)` when there is no session or the server rejects the token.
    pub async fn get_user(&self) -> Result<Option<User>, SupabaseError> {
        let Some(session) = self.client.session() else {
            return Ok(None);
        };

        let response = self
            .client
            .http
            .get(self.client.info.endpoint("auth/v1/user"))
            .headers(self.client.headers(Some(&session.access_token))?)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        Ok(Some(check_status(response).await?.json().await?))
    }

    /// Exchange the stored refresh token for a new session and store it.
    pub async fn refresh_session(&self) -> Result<Session, SupabaseError> {
        let session = self.client.session().ok_or(SupabaseError::NoSession)?;

        let response = self
            .client
            .http
            .post(self.client.info.endpoint("auth/v1/token"))
            .query(&[("grant_type", "refresh_token")])
            .headers(self.client.headers(None)?)
            .json(&RefreshRequest {
                refresh_token: &session.refresh_token,
            })
            .send()
            .await?;

        let refreshed: Session = check_status(response).await?.json().await?;
        let refreshed = refreshed.with_expiry_from(now_secs());
        self.client.store_session(&refreshed)?;

        tracing::debug!(
            user = ?refreshed.user.as_ref().map(|u| u.id.as_str()),
            "Supabase session refreshed"
        );
        Ok(refreshed)
    }

    /// Revoke the stored session and clear its cookies.
    ///
    /// A token the server no longer accepts still counts as signed out.
    pub async fn sign_out(&self) -> Result<(), SupabaseError> {
        let Some(store) = &self.client.cookies else {
            return Ok(());
        };
        let Some(session) = self.client.session() else {
            return Ok(());
        };

        let response = self
            .client
            .http
            .post(self.client.info.endpoint("auth/v1/logout"))
            .headers(self.client.headers(Some(&session.access_token))?)
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED
            | reqwest::StatusCode::FORBIDDEN
            | reqwest::StatusCode::NOT_FOUND => {
                tracing::debug!(status = %response.status(), "Session already revoked");
            }
            _ => {
                check_status(response).await?;
            }
        }

        let removals = Session::removal_cookies(&self.client.info.session_cookie_name(), &store.get_all());
        store.set_all(removals)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::cookies::{RequestCookieStore, ResponseCookieStore};
    use crate::supabase::schema::Article;
    use axum::http::{header, HeaderMap as AxumHeaders, HeaderValue as AxumValue};
    use wiremock::matchers::{body_json, header as header_is, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session(expires_at: i64) -> Session {
        Session {
            access_token: "old-access".into(),
            refresh_token: "old-refresh".into(),
            expires_in: Some(3600),
            expires_at: Some(expires_at),
            token_type: "bearer".into(),
            user: None,
        }
    }

    fn cookie_headers(info: &SupabaseInfo, session: &Session) -> AxumHeaders {
        let mut headers = AxumHeaders::new();
        let value = format!("{}={}", info.session_cookie_name(), session.encode().unwrap());
        headers.insert(header::COOKIE, AxumValue::from_str(&value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_select_uses_anon_key_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/article"))
            .and(query_param("select", "id,title"))
            .and(query_param("slug", "eq.hello"))
            .and(query_param("order", "id.desc"))
            .and(query_param("limit", "1"))
            .and(header_is("apikey", "anon"))
            .and(header_is("authorization", "Bearer anon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "Hello"}
            ])))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let client = SupabaseClient::create_browser_client(info).unwrap();
        let rows: Vec<serde_json::Value> = client
            .table::<Article>()
            .select("id,title")
            .eq("slug", "hello")
            .order("id", false)
            .limit(1)
            .fetch()
            .await
            .unwrap();
        assert_eq!(rows[0]["title"], "Hello");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/comment"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let client = SupabaseClient::create_browser_client(info).unwrap();
        let err = client
            .from("comment")
            .insert(&[serde_json::json!({"id": 1})])
            .await
            .unwrap_err();
        match err {
            SupabaseError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "duplicate key");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_session_token_is_used_for_get_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header_is("authorization", "Bearer old-access"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1", "email": "a@example.com"
            })))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let store = RequestCookieStore::from_headers(&cookie_headers(&info, &session(i64::MAX)));
        let client = SupabaseClient::create_server_client(info, Arc::new(store)).unwrap();

        let user = client.auth().get_user().await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
    }

    #[tokio::test]
    async fn test_get_user_without_session() {
        let info = SupabaseInfo::new("http://127.0.0.1:9", "anon").unwrap();
        let client = SupabaseClient::create_server_client(
            info,
            Arc::new(RequestCookieStore::from_headers(&AxumHeaders::new())),
        )
        .unwrap();
        assert_eq!(client.auth().get_user().await.unwrap(), None);
        assert!(matches!(
            client.auth().refresh_session().await,
            Err(SupabaseError::NoSession)
        ));
    }

    #[tokio::test]
    async fn test_refresh_writes_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_json(serde_json::json!({"refresh_token": "old-refresh"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "refresh_token": "new-refresh",
                "expires_in": 3600,
                "token_type": "bearer",
                "user": {"id": "user-1"}
            })))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let store = Arc::new(ResponseCookieStore::from_headers(&cookie_headers(
            &info,
            &session(0),
        )));
        let client = SupabaseClient::create_server_client(info.clone(), store.clone()).unwrap();

        let refreshed = client.auth().refresh_session().await.unwrap();
        assert_eq!(refreshed.access_token, "new-access");
        assert!(refreshed.expires_at.is_some());

        let pending = store.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, info.session_cookie_name());
        assert_eq!(client.session().unwrap().access_token, "new-access");
    }

    #[tokio::test]
    async fn test_refresh_over_read_only_store_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "refresh_token": "new-refresh",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let store = RequestCookieStore::from_headers(&cookie_headers(&info, &session(0)));
        let client = SupabaseClient::create_server_client(info, Arc::new(store)).unwrap();

        assert!(client.auth().refresh_session().await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears_chunks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header_is("authorization", "Bearer old-access"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let name = info.session_cookie_name();
        let encoded = session(i64::MAX).encode().unwrap();
        let (first, second) = encoded.split_at(encoded.len() / 2);
        let mut headers = AxumHeaders::new();
        headers.insert(
            header::COOKIE,
            AxumValue::from_str(&format!("{name}.0={first}; {name}.1={second}; theme=dark")).unwrap(),
        );
        let store = Arc::new(ResponseCookieStore::from_headers(&headers));
        let client = SupabaseClient::create_server_client(info, store.clone()).unwrap();
        assert!(client.session().is_some());

        client.auth().sign_out().await.unwrap();

        let mut removed: Vec<String> = store.pending().into_iter().map(|c| c.name).collect();
        removed.sort();
        assert_eq!(removed, vec![format!("{name}.0"), format!("{name}.1")]);
        assert!(store.pending().iter().all(|c| c.options.max_age_secs == Some(0)));
        assert!(client.session().is_none());
        assert_eq!(store.get_all(), vec![("theme".to_string(), "dark".to_string())]);
    }

    #[tokio::test]
    async fn test_sign_out_over_read_only_store_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let store = RequestCookieStore::from_headers(&cookie_headers(&info, &session(i64::MAX)));
        let client = SupabaseClient::create_server_client(info, Arc::new(store)).unwrap();

        assert!(matches!(
            client.auth().sign_out().await,
            Err(SupabaseError::CookieStore(_))
        ));
    }

    #[tokio::test]
    async fn test_update_sends_filters_and_changes() {
        use crate::supabase::schema::{Notification, NotificationUpdate};

        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/notification"))
            .and(query_param("id", "eq.7"))
            .and(body_json(serde_json::json!({"is_read": true})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let info = SupabaseInfo::new(&server.uri(), "anon").unwrap();
        let client = SupabaseClient::create_browser_client(info).unwrap();
        client
            .table::<Notification>()
            .eq("id", 7)
            .update(&NotificationUpdate {
                is_read: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
    }
}
