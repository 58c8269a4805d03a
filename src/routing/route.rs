//! Validated route paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when a string is not a well-formed route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The route string was empty.
    #[error("invalid route: route must not be empty")]
    Empty,

    /// The route string did not start with `/`.
    #[error("invalid route {0:?}: route must start with '/'")]
    MissingLeadingSlash(String),
}

/// A navigable destination path such as `/products`.
///
/// Always non-empty and always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(String);

impl Route {
    /// The root route, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Validate and wrap a path.
    pub fn new(path: impl Into<String>) -> Result<Self, RouteError> {
        let path = path.into();
        if path.is_empty() {
            return Err(RouteError::Empty);
        }
        if !path.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(path));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Route {
    type Error = RouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Route::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_routes() {
        assert_eq!(Route::new("/").unwrap().as_str(), "/");
        assert_eq!(Route::new("/products").unwrap().to_string(), "/products");
        assert!(Route::root().is_root());
        assert!(!Route::new("/blog").unwrap().is_root());
    }

    #[test]
    fn test_invalid_routes_fail_fast() {
        assert_eq!(Route::new(""), Err(RouteError::Empty));
        assert_eq!(
            "blog".parse::<Route>(),
            Err(RouteError::MissingLeadingSlash("blog".into()))
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_route() {
        #[derive(Deserialize)]
        struct Wrapper {
            href: Route,
        }

        let ok: Wrapper = toml::from_str(r#"href = "/about""#).unwrap();
        assert_eq!(ok.href.as_str(), "/about");

        let err = toml::from_str::<Wrapper>(r#"href = "about""#);
        assert!(err.is_err());
    }
}
