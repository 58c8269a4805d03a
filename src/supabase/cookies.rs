//! Cookie storage used by the Supabase client.

use std::sync::Mutex;

use axum::http::{header, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::supabase::SupabaseError;

/// Attributes of a cookie being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: Option<String>,
    pub max_age_secs: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: Some("/".to_string()),
            max_age_secs: Some(400 * 24 * 60 * 60),
            http_only: false,
            secure: false,
            same_site: Some(SameSite::Lax),
        }
    }
}

/// A cookie the client wants persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieToSet {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

impl CookieToSet {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            options: CookieOptions::default(),
        }
    }

    /// A cookie that deletes `name` in the browser.
    pub fn removal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            options: CookieOptions {
                max_age_secs: Some(0),
                ..CookieOptions::default()
            },
        }
    }

    /// Serialize as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> Result<HeaderValue, SupabaseError> {
        let mut raw = format!("{}={}", self.name, self.value);
        if let Some(path) = &self.options.path {
            raw.push_str(&format!("; Path={path}"));
        }
        if let Some(max_age) = self.options.max_age_secs {
            raw.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.options.http_only {
            raw.push_str("; HttpOnly");
        }
        if self.options.secure {
            raw.push_str("; Secure");
        }
        if let Some(same_site) = self.options.same_site {
            raw.push_str(&format!("; SameSite={same_site}"));
        }

        let cookie = Cookie::parse(raw)
            .map_err(|e| SupabaseError::CookieStore(format!("invalid cookie {}: {e}", self.name)))?;
        HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| SupabaseError::CookieStore(e.to_string()))
    }
}

/// Where the Supabase client reads and writes its cookies.
pub trait CookieStore: Send + Sync + std::fmt::Debug {
    /// All cookies visible to the current request, as `(name, value)`.
    fn get_all(&self) -> Vec<(String, String)>;

    /// Persist several cookies at once.
    fn set_all(&self, cookies: Vec<CookieToSet>) -> Result<(), SupabaseError>;
}

fn jar_pairs(jar: &CookieJar) -> Vec<(String, String)> {
    jar.iter()
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect()
}

/// Read-only cookies of an incoming request.
#[derive(Debug, Clone)]
pub struct RequestCookieStore {
    jar: CookieJar,
}

impl RequestCookieStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }
}

impl CookieStore for RequestCookieStore {
    fn get_all(&self) -> Vec<(String, String)> {
        jar_pairs(&self.jar)
    }

    fn set_all(&self, _cookies: Vec<CookieToSet>) -> Result<(), SupabaseError> {
        Err(SupabaseError::CookieStore(
            "cookies cannot be written while rendering".to_string(),
        ))
    }
}

/// Request cookies plus the cookies to send back on the response.
#[derive(Debug, Default)]
pub struct ResponseCookieStore {
    request: Vec<(String, String)>,
    pending: Mutex<Vec<CookieToSet>>,
}

impl ResponseCookieStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            request: jar_pairs(&CookieJar::from_headers(headers)),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Cookies written so far, in write order.
    pub fn pending(&self) -> Vec<CookieToSet> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_changes(&self) -> bool {
        !self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    /// `Set-Cookie` values for every pending cookie.
    pub fn set_cookie_headers(&self) -> Result<Vec<HeaderValue>, SupabaseError> {
        self.pending()
            .iter()
            .map(CookieToSet::to_header_value)
            .collect()
    }

    /// A `Cookie` request header reflecting the pending writes.
    pub fn request_cookie_header(&self) -> Option<HeaderValue> {
        let pairs = self.get_all();
        if pairs.is_empty() {
            return None;
        }
        let joined = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).ok()
    }

    /// Replace the `Cookie` header of `headers` with the merged view.
    pub fn apply_to_request(&self, headers: &mut HeaderMap) {
        headers.remove(header::COOKIE);
        if let Some(value) = self.request_cookie_header() {
            headers.insert(header::COOKIE, value);
        }
    }
}

impl CookieStore for ResponseCookieStore {
    fn get_all(&self) -> Vec<(String, String)> {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let mut merged: Vec<(String, String)> = self
            .request
            .iter()
            .filter(|(name, _)| !pending.iter().any(|c| c.name == *name))
            .cloned()
            .collect();
        for cookie in pending.iter() {
            if cookie.options.max_age_secs != Some(0) {
                merged.push((cookie.name.clone(), cookie.value.clone()));
            }
        }
        merged
    }

    fn set_all(&self, cookies: Vec<CookieToSet>) -> Result<(), SupabaseError> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        for cookie in cookies {
            pending.retain(|c| c.name != cookie.name);
            pending.push(cookie);
        }
        Ok(())
    }
}
