//! Supabase project URL and public key.

use url::Url;

use crate::config::loader::{SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV};
use crate::config::SupabaseConfig;
use crate::supabase::SupabaseError;

/// Validated connection details for one Supabase project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseInfo {
    pub url: Url,
    pub anon_key: String,
}

impl SupabaseInfo {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, SupabaseError> {
        let anon_key = anon_key.into();
        if url.is_empty() || anon_key.is_empty() {
            return Err(SupabaseError::MissingCredentials);
        }
        let url = Url::parse(url).map_err(|_| SupabaseError::InvalidUrl(url.to_string()))?;
        if url.host_str().is_none() {
            return Err(SupabaseError::InvalidUrl(url.to_string()));
        }
        Ok(Self { url, anon_key })
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`; both are required.
    pub fn from_env() -> Result<Self, SupabaseError> {
        let url = std::env::var(SUPABASE_URL_ENV).map_err(|_| SupabaseError::MissingCredentials)?;
        let key =
            std::env::var(SUPABASE_ANON_KEY_ENV).map_err(|_| SupabaseError::MissingCredentials)?;
        Self::new(&url, key)
    }

    /// `Ok(None)` when the project is not configured at all.
    pub fn from_config(config: &SupabaseConfig) -> Result<Option<Self>, SupabaseError> {
        match (&config.url, &config.anon_key) {
            (None, None) => Ok(None),
            (Some(url), Some(key)) => Self::new(url, key.clone()).map(Some),
            _ => Err(SupabaseError::MissingCredentials),
        }
    }

    /// Project reference: the first label of the project host.
    pub fn project_ref(&self) -> &str {
        let host = self.url.host_str().unwrap_or_default();
        host.split('.').next().unwrap_or(host)
    }

    /// Name of the auth session cookie, `sb-<ref>-auth-token`.
    pub fn session_cookie_name(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }

    /// `<project url>/<path>`, tolerating a trailing slash on the project URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ref_and_cookie_name() {
        let info = SupabaseInfo::new("https://abcdefgh.supabase.co", "anon").unwrap();
        assert_eq!(info.project_ref(), "abcdefgh");
        assert_eq!(info.session_cookie_name(), "sb-abcdefgh-auth-token");
        assert_eq!(
            info.endpoint("/rest/v1/article"),
            "https://abcdefgh.supabase.co/rest/v1/article"
        );
    }

    #[test]
    fn test_rejects_missing_or_bad_values() {
        assert!(matches!(
            SupabaseInfo::new("", "anon"),
            Err(SupabaseError::MissingCredentials)
        ));
        assert!(matches!(
            SupabaseInfo::new("https://x.supabase.co", ""),
            Err(SupabaseError::MissingCredentials)
        ));
        assert!(matches!(
            SupabaseInfo::new("not a url", "anon"),
            Err(SupabaseError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_config() {
        assert!(SupabaseInfo::from_config(&SupabaseConfig::default())
            .unwrap()
            .is_none());

        let partial = SupabaseConfig {
            url: Some("https://x.supabase.co".into()),
            anon_key: None,
        };
        assert!(SupabaseInfo::from_config(&partial).is_err());

        let full = SupabaseConfig {
            url: Some("http://127.0.0.1:54321".into()),
            anon_key: Some("anon".into()),
        };
        let info = SupabaseInfo::from_config(&full).unwrap().unwrap();
        assert_eq!(info.project_ref(), "127");
    }
}
