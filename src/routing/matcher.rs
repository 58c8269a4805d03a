//! Route matching logic.
//!
//! # Responsibilities
//! - Decide whether a target route is active for the current location
//! - Exact mode: full string equality
//! - PrefixOrExact mode: equality, or nested sub-path of the target
//!
//! # Design Decisions
//! - A nested sub-path must continue with `/` (`/blog-archive` is not under `/blog`)
//! - The root route never matches by prefix, otherwise every path would be active
//! - No regex, O(n) in the path length

use serde::{Deserialize, Serialize};

use crate::routing::route::Route;

/// How a navigation target is compared against the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Only the exact path is active.
    Exact,
    /// The exact path and any nested sub-path are active.
    #[default]
    PrefixOrExact,
}

impl MatchMode {
    /// `exact = true` selects [`MatchMode::Exact`].
    pub fn from_exact(exact: bool) -> Self {
        if exact {
            MatchMode::Exact
        } else {
            MatchMode::PrefixOrExact
        }
    }
}

/// Trait for matching the current location against a navigation target.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the target is active at `location`.
    fn matches(&self, location: &Route) -> bool;
}

/// Matches the target path exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    target: Route,
}

impl ExactMatcher {
    pub fn new(target: Route) -> Self {
        Self { target }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, location: &Route) -> bool {
        location.as_str() == self.target.as_str()
    }
}

/// Matches the target path or any path nested below it.
#[derive(Debug, Clone)]
pub struct PrefixOrExactMatcher {
    target: Route,
}

impl PrefixOrExactMatcher {
    pub fn new(target: Route) -> Self {
        Self { target }
    }
}

impl Matcher for PrefixOrExactMatcher {
    fn matches(&self, location: &Route) -> bool {
        let location = location.as_str();
        let target = self.target.as_str();

        if location == target {
            return true;
        }
        if self.target.is_root() {
            return false;
        }

        location
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Build the matcher for a target under the given mode.
pub fn matcher_for(target: Route, mode: MatchMode) -> Box<dyn Matcher> {
    match mode {
        MatchMode::Exact => Box::new(ExactMatcher::new(target)),
        MatchMode::PrefixOrExact => Box::new(PrefixOrExactMatcher::new(target)),
    }
}

/// Decide whether `target` should be marked active at `current_location`.
pub fn is_active(current_location: &Route, target: &Route, mode: MatchMode) -> bool {
    matcher_for(target.clone(), mode).matches(current_location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(path: &str) -> Route {
        Route::new(path).unwrap()
    }

    #[test]
    fn test_exact_matches_itself() {
        for path in ["/", "/about", "/blog/post-1", "/a/b/c/"] {
            assert!(is_active(&r(path), &r(path), MatchMode::Exact));
            assert!(is_active(&r(path), &r(path), MatchMode::PrefixOrExact));
        }
    }

    #[test]
    fn test_nested_path_is_active() {
        // Scenario: /blog/post-1 under /blog
        assert!(is_active(&r("/blog/post-1"), &r("/blog"), MatchMode::PrefixOrExact));
        assert!(is_active(&r("/blog/2024/01/x"), &r("/blog"), MatchMode::PrefixOrExact));
        assert!(is_active(&r("/blog/"), &r("/blog"), MatchMode::PrefixOrExact));
    }

    #[test]
    fn test_no_partial_overlap() {
        assert!(!is_active(&r("/blog-archive"), &r("/blog"), MatchMode::PrefixOrExact));
        assert!(!is_active(&r("/blogs"), &r("/blog"), MatchMode::PrefixOrExact));
        assert!(!is_active(&r("/bl"), &r("/blog"), MatchMode::PrefixOrExact));
    }

    #[test]
    fn test_root_never_prefix_matches() {
        assert!(is_active(&r("/"), &r("/"), MatchMode::PrefixOrExact));
        for path in ["/about", "/blog/post-1", "//"] {
            assert!(!is_active(&r(path), &r("/"), MatchMode::PrefixOrExact));
        }
    }

    #[test]
    fn test_exact_mode_rejects_sub_paths() {
        assert!(is_active(&r("/about"), &r("/about"), MatchMode::Exact));
        assert!(!is_active(&r("/about/team"), &r("/about"), MatchMode::Exact));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_active(&r("/Blog"), &r("/blog"), MatchMode::PrefixOrExact));
    }

    #[test]
    fn test_matcher_for_mode() {
        let exact = matcher_for(r("/docs"), MatchMode::from_exact(true));
        let prefix = matcher_for(r("/docs"), MatchMode::from_exact(false));
        assert!(!exact.matches(&r("/docs/intro")));
        assert!(prefix.matches(&r("/docs/intro")));
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9_.-]{1,8}"
    }

    fn route_from(segments: &[String]) -> Route {
        Route::new(format!("/{}", segments.join("/"))).unwrap()
    }

    proptest! {
        #[test]
        fn test_any_route_matches_itself(segments in prop::collection::vec(segment(), 0..6)) {
            let route = route_from(&segments);
            prop_assert!(is_active(&route, &route, MatchMode::Exact));
            prop_assert!(is_active(&route, &route, MatchMode::PrefixOrExact));
        }

        #[test]
        fn test_nested_location_is_active(
            target in prop::collection::vec(segment(), 1..4),
            tail in prop::collection::vec(segment(), 0..4),
        ) {
            let target_route = route_from(&target);
            let location = Route::new(format!("{}/{}", target_route, tail.join("/"))).unwrap();
            prop_assert!(is_active(&location, &target_route, MatchMode::PrefixOrExact));
            prop_assert!(!is_active(&location, &target_route, MatchMode::Exact));
        }

        #[test]
        fn test_root_is_only_active_at_root(segments in prop::collection::vec(segment(), 1..6)) {
            let location = route_from(&segments);
            prop_assert!(!is_active(&location, &Route::root(), MatchMode::PrefixOrExact));
            prop_assert!(!is_active(&location, &Route::root(), MatchMode::Exact));
        }

        #[test]
        fn test_sibling_with_shared_prefix_is_inactive(
            target in prop::collection::vec(segment(), 1..4),
            suffix in "[a-z0-9_-]{1,6}",
            tail in prop::collection::vec(segment(), 0..3),
        ) {
            let target_route = route_from(&target);
            let mut location = format!("{target_route}{suffix}");
            for seg in &tail {
                location.push('/');
                location.push_str(seg);
            }
            let location = Route::new(location).unwrap();
            prop_assert!(!is_active(&location, &target_route, MatchMode::PrefixOrExact));
        }
    }
}
