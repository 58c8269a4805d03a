//! Auth session encoding in cookies.
//!
//! The session is stored as `base64-<base64url(json)>` under
//! `sb-<ref>-auth-token`. Values longer than [`MAX_CHUNK_SIZE`] are split
//! over `sb-<ref>-auth-token.0`, `.1`, … and joined again on read.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::supabase::cookies::CookieToSet;
use crate::supabase::SupabaseError;

pub const BASE64_PREFIX: &str = "base64-";
pub const MAX_CHUNK_SIZE: usize = 3180;

/// Refresh when the access token expires within this many seconds.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// An authenticated user as returned by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Tokens for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the server omitted it.
    pub fn with_expiry_from(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now + secs);
        }
        self
    }

    /// True when the access token is expired or about to be.
    pub fn needs_refresh(&self, now: i64) -> bool {
        match self.expires_at {
            Some(at) => at - now <= EXPIRY_MARGIN_SECS,
            None => false,
        }
    }

    pub fn encode(&self) -> Result<String, SupabaseError> {
        let json = serde_json::to_vec(self).map_err(|e| SupabaseError::Session(e.to_string()))?;
        Ok(format!("{BASE64_PREFIX}{}", URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode a cookie value, prefixed base64 or raw JSON.
    pub fn decode(value: &str) -> Result<Self, SupabaseError> {
        let json = match value.strip_prefix(BASE64_PREFIX) {
            Some(encoded) => URL_SAFE_NO_PAD
                .decode(encoded.trim_end_matches('='))
                .map_err(|e| SupabaseError::Session(e.to_string()))?,
            None => value.as_bytes().to_vec(),
        };
        serde_json::from_slice(&json).map_err(|e| SupabaseError::Session(e.to_string()))
    }

    /// Read the session cookie (whole or chunked) from `cookies`.
    pub fn from_cookies(
        cookies: &[(String, String)],
        name: &str,
    ) -> Result<Option<Self>, SupabaseError> {
        let lookup = |key: &str| {
            cookies
                .iter()
                .find(|(n, _)| n == key)
                .map(|(_, v)| v.as_str())
        };

        let value = match lookup(name) {
            Some(whole) => whole.to_string(),
            None => {
                let mut joined = String::new();
                for idx in 0.. {
                    match lookup(&format!("{name}.{idx}")) {
                        Some(chunk) => joined.push_str(chunk),
                        None => break,
                    }
                }
                if joined.is_empty() {
                    return Ok(None);
                }
                joined
            }
        };

        Self::decode(&value).map(Some)
    }

    /// Cookies that store this session, removing stale chunks.
    pub fn to_cookies(
        &self,
        name: &str,
        existing: &[(String, String)],
    ) -> Result<Vec<CookieToSet>, SupabaseError> {
        let encoded = self.encode()?;
        let mut out = Vec::new();
        let mut written = Vec::new();

        if encoded.len() <= MAX_CHUNK_SIZE {
            written.push(name.to_string());
            out.push(CookieToSet::new(name, encoded));
        } else {
            let bytes = encoded.as_bytes();
            for (idx, chunk) in bytes.chunks(MAX_CHUNK_SIZE).enumerate() {
                let chunk_name = format!("{name}.{idx}");
                // base64url output is ASCII, so byte chunks are valid UTF-8
                let chunk = String::from_utf8_lossy(chunk).into_owned();
                written.push(chunk_name.clone());
                out.push(CookieToSet::new(chunk_name, chunk));
            }
        }

        out.extend(stale_cookies(name, existing, &written));
        Ok(out)
    }

    /// Cookies that remove any stored session.
    pub fn removal_cookies(name: &str, existing: &[(String, String)]) -> Vec<CookieToSet> {
        stale_cookies(name, existing, &[])
    }
}

fn stale_cookies(name: &str, existing: &[(String, String)], keep: &[String]) -> Vec<CookieToSet> {
    let chunk_prefix = format!("{name}.");
    existing
        .iter()
        .map(|(n, _)| n)
        .filter(|n| *n == name || n.starts_with(&chunk_prefix))
        .filter(|n| !keep.contains(n))
        .map(|n| CookieToSet::removal(n.clone()))
        .collect()
}
