//! Style token resolution.
//!
//! # Responsibilities
//! - Hold ordered style token sets (`ClassSet`)
//! - Combine base and state-conditional tokens (`resolve`)
//! - Merge class fragments where later utilities override earlier ones (`tw`)
//!
//! # Design Decisions
//! - Disabled > Active > Inactive; disabled never carries active/inactive tokens
//! - Base tokens always come before conditional tokens
//! - `ClassSet` permits duplicates; only `tw` collapses conflicts

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens applied when a link is disabled and the caller gave none.
pub const DEFAULT_DISABLED_CLASS: &str = "cursor-not-allowed opacity-50";

/// Tokens applied when a link is active and the caller gave none.
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// An ordered collection of style tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSet(Vec<String>);

impl ClassSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Split a whitespace-separated class string into tokens.
    pub fn parse(classes: &str) -> Self {
        Self(classes.split_whitespace().map(str::to_string).collect())
    }

    pub fn push(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            self.0.push(token);
        }
    }

    /// Append every token of `other`, keeping order.
    pub fn extend(&mut self, other: &ClassSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &ClassSet) -> ClassSet {
        let mut out = self.clone();
        out.extend(other);
        out
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl From<&str> for ClassSet {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl<S: Into<String>> FromIterator<S> for ClassSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ClassSet::new();
        for token in iter {
            set.push(token);
        }
        set
    }
}

/// Visual state of a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleState {
    Active,
    Inactive,
    Disabled,
}

impl StyleState {
    /// Disabled wins regardless of the match result.
    pub fn from_flags(is_active: bool, is_disabled: bool) -> Self {
        if is_disabled {
            StyleState::Disabled
        } else if is_active {
            StyleState::Active
        } else {
            StyleState::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleState::Active => "active",
            StyleState::Inactive => "inactive",
            StyleState::Disabled => "disabled",
        }
    }
}

/// Per-state token sets for a navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTokens {
    pub base: ClassSet,
    pub active: ClassSet,
    pub inactive: ClassSet,
    pub disabled: ClassSet,
}

impl Default for ClassTokens {
    fn default() -> Self {
        Self {
            base: ClassSet::new(),
            active: ClassSet::parse(DEFAULT_ACTIVE_CLASS),
            inactive: ClassSet::new(),
            disabled: ClassSet::parse(DEFAULT_DISABLED_CLASS),
        }
    }
}

impl ClassTokens {
    /// Tokens for the given state, base first.
    pub fn for_state(&self, state: StyleState) -> ClassSet {
        match state {
            StyleState::Active => self.base.concat(&self.active),
            StyleState::Inactive => self.base.concat(&self.inactive),
            StyleState::Disabled => self.base.concat(&self.disabled),
        }
    }
}

/// Combine base and conditional tokens for one render.
pub fn resolve(
    base: &ClassSet,
    is_active: bool,
    is_disabled: bool,
    active_tokens: &ClassSet,
    inactive_tokens: &ClassSet,
    disabled_tokens: &ClassSet,
) -> ClassSet {
    match StyleState::from_flags(is_active, is_disabled) {
        StyleState::Disabled => base.concat(disabled_tokens),
        StyleState::Active => base.concat(active_tokens),
        StyleState::Inactive => base.concat(inactive_tokens),
    }
}

// Utility groups whose members override each other. Longest prefix wins.
const UTILITY_GROUPS: &[&str] = &[
    "p-", "px-", "py-", "pt-", "pr-", "pb-", "pl-",
    "m-", "mx-", "my-", "mt-", "mr-", "mb-", "ml-",
    "w-", "h-", "min-w-", "min-h-", "max-w-", "max-h-",
    "gap-", "gap-x-", "gap-y-",
    "opacity-", "cursor-", "bg-", "rounded-", "shadow-", "z-",
    "items-", "justify-", "place-content-", "leading-", "tracking-",
];

// Shorthand groups that also replace their axis and side forms.
const SHORTHAND_CLEARS: &[(&str, &[&str])] = &[
    ("p-", &["px-", "py-", "pt-", "pr-", "pb-", "pl-"]),
    ("px-", &["pr-", "pl-"]),
    ("py-", &["pt-", "pb-"]),
    ("m-", &["mx-", "my-", "mt-", "mr-", "mb-", "ml-"]),
    ("mx-", &["mr-", "ml-"]),
    ("my-", &["mt-", "mb-"]),
    ("gap-", &["gap-x-", "gap-y-"]),
];

const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];

const BG_POSITION: &[&str] = &[
    "bottom", "center", "left", "left-bottom", "left-top", "right", "right-bottom", "right-top",
    "top",
];

const BG_SIZE: &[&str] = &["auto", "cover", "contain"];

const BG_REPEAT: &[&str] = &["repeat", "no-repeat", "repeat-x", "repeat-y", "repeat-round", "repeat-space"];

const BG_ATTACHMENT: &[&str] = &["fixed", "local", "scroll"];

const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];

const FONT_WEIGHTS: &[&str] = &[
    "thin", "extralight", "light", "normal", "medium", "semibold", "bold", "extrabold", "black",
];

const DISPLAY: &[&str] = &[
    "block", "inline-block", "inline", "flex", "inline-flex", "grid", "inline-grid", "hidden",
    "contents",
];

const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];

fn split_variant(token: &str) -> (&str, &str) {
    match token.rfind(':') {
        Some(idx) => token.split_at(idx + 1),
        None => ("", token),
    }
}

/// Conflict key of a token: variant prefix plus utility group.
fn conflict_key(token: &str) -> String {
    let (variant, utility) = split_variant(token);

    let group = if DISPLAY.contains(&utility) {
        "display".to_string()
    } else if POSITION.contains(&utility) {
        "position".to_string()
    } else if let Some(rest) = utility.strip_prefix("text-") {
        if TEXT_SIZES.contains(&rest) {
            "text-size".to_string()
        } else if TEXT_ALIGN.contains(&rest) {
            "text-align".to_string()
        } else {
            "text-color".to_string()
        }
    } else if let Some(rest) = utility.strip_prefix("bg-") {
        if BG_POSITION.contains(&rest) {
            "bg-position".to_string()
        } else if BG_SIZE.contains(&rest) {
            "bg-size".to_string()
        } else if BG_REPEAT.contains(&rest) {
            "bg-repeat".to_string()
        } else if BG_ATTACHMENT.contains(&rest) {
            "bg-attachment".to_string()
        } else {
            "bg-".to_string()
        }
    } else if let Some(rest) = utility.strip_prefix("font-") {
        if FONT_WEIGHTS.contains(&rest) {
            "font-weight".to_string()
        } else {
            "font-family".to_string()
        }
    } else {
        UTILITY_GROUPS
            .iter()
            .filter(|prefix| utility.starts_with(*prefix))
            .max_by_key(|prefix| prefix.len())
            .map(|prefix| prefix.to_string())
            .unwrap_or_else(|| utility.to_string())
    };

    format!("{variant}{group}")
}

/// Keys of the narrower groups a shorthand key overrides.
fn cleared_keys(key: &str) -> Vec<String> {
    let (variant, group) = split_variant(key);
    SHORTHAND_CLEARS
        .iter()
        .find(|(shorthand, _)| *shorthand == group)
        .map(|(_, narrower)| narrower.iter().map(|g| format!("{variant}{g}")).collect())
        .unwrap_or_default()
}

/// Merge class fragments, skipping empty ones.
///
/// A later token replaces any earlier token in the same utility group
/// (`p-2 p-4` → `p-4`, `text-sm text-lg` → `text-lg`).
pub fn tw<'a, I>(fragments: I) -> ClassSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut merged: Vec<(String, String)> = Vec::new();
    for fragment in fragments {
        for token in fragment.split_whitespace() {
            let key = conflict_key(token);
            let cleared = cleared_keys(&key);
            merged.retain(|(existing, _)| *existing != key && !cleared.contains(existing));
            merged.push((key, token.to_string()));
        }
    }
    merged.into_iter().map(|(_, token)| token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens() -> (ClassSet, ClassSet, ClassSet, ClassSet) {
        (
            ClassSet::parse("px-2 py-1"),
            ClassSet::parse("text-blue-600 font-bold"),
            ClassSet::parse("text-gray-500"),
            ClassSet::parse(DEFAULT_DISABLED_CLASS),
        )
    }

    #[test]
    fn test_active_and_inactive() {
        let (base, active, inactive, disabled) = tokens();

        let on = resolve(&base, true, false, &active, &inactive, &disabled);
        assert_eq!(on.to_string(), "px-2 py-1 text-blue-600 font-bold");

        let off = resolve(&base, false, false, &active, &inactive, &disabled);
        assert_eq!(off.to_string(), "px-2 py-1 text-gray-500");
    }

    #[test]
    fn test_disabled_overrides_state() {
        let (base, active, inactive, disabled) = tokens();
        for is_active in [true, false] {
            let out = resolve(&base, is_active, true, &active, &inactive, &disabled);
            assert_eq!(out, base.concat(&disabled));
            assert!(!out.contains("text-blue-600"));
            assert!(!out.contains("text-gray-500"));
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (base, active, inactive, disabled) = tokens();
        let first = resolve(&base, true, false, &active, &inactive, &disabled);
        let second = resolve(&base, true, false, &active, &inactive, &disabled);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicates_permitted() {
        let base = ClassSet::parse("link");
        let active = ClassSet::parse("link");
        let out = resolve(&base, true, false, &active, &ClassSet::new(), &ClassSet::new());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_default_tokens() {
        let defaults = ClassTokens::default();
        assert_eq!(defaults.for_state(StyleState::Active).to_string(), "active");
        assert!(defaults.for_state(StyleState::Inactive).is_empty());
        assert_eq!(
            defaults.for_state(StyleState::Disabled).to_string(),
            "cursor-not-allowed opacity-50"
        );
    }

    #[test]
    fn test_tw_merges_conflicts() {
        assert_eq!(tw(["p-2 text-sm", "p-4"]).to_string(), "text-sm p-4");
        assert_eq!(tw(["text-sm text-red-500", "text-lg"]).to_string(), "text-red-500 text-lg");
        assert_eq!(tw(["hover:p-2 p-1", "hover:p-3"]).to_string(), "p-1 hover:p-3");
        assert_eq!(tw(["relative", ""]).to_string(), "relative");
        assert_eq!(tw(["flex", "grid"]).to_string(), "grid");
    }

    #[test]
    fn test_tw_keeps_distinct_groups() {
        let merged = tw(["container mx-auto p-5 flex flex-col gap-y-2 items-start", "gap-x-4"]);
        assert_eq!(
            merged.to_string(),
            "container mx-auto p-5 flex flex-col gap-y-2 items-start gap-x-4"
        );
        assert_eq!(tw(["text-red-500", "text-center"]).to_string(), "text-red-500 text-center");
        assert_eq!(tw(["text-left text-sm", "text-right"]).to_string(), "text-sm text-right");
        assert_eq!(
            tw(["bg-red-500 bg-cover", "bg-center bg-no-repeat"]).to_string(),
            "bg-red-500 bg-cover bg-center bg-no-repeat"
        );
        assert_eq!(tw(["bg-red-500 bg-cover", "bg-blue-500"]).to_string(), "bg-cover bg-blue-500");
    }

    #[test]
    fn test_tw_shorthand_clears_axis_forms() {
        assert_eq!(tw(["px-2 pt-1", "p-5"]).to_string(), "p-5");
        assert_eq!(tw(["p-5", "px-2"]).to_string(), "p-5 px-2");
        assert_eq!(tw(["pl-1 pt-1", "px-3"]).to_string(), "pt-1 px-3");
        assert_eq!(tw(["mx-auto my-2", "m-4"]).to_string(), "m-4");
        assert_eq!(tw(["hover:px-2 px-1", "hover:p-4"]).to_string(), "px-1 hover:p-4");
        assert_eq!(tw(["gap-x-2 gap-y-1", "gap-4"]).to_string(), "gap-4");
    }

    fn token_list() -> impl Strategy<Value = ClassSet> {
        prop::collection::vec("[a-z][a-z0-9-]{0,10}", 0..5).prop_map(|tokens| tokens.into_iter().collect())
    }

    proptest! {
        #[test]
        fn test_disabled_never_gets_state_tokens(
            base in token_list(),
            active in token_list(),
            inactive in token_list(),
            disabled in token_list(),
            is_active in any::<bool>(),
        ) {
            let out = resolve(&base, is_active, true, &active, &inactive, &disabled);
            prop_assert_eq!(out, base.concat(&disabled));
        }

        #[test]
        fn test_resolve_is_deterministic(
            base in token_list(),
            active in token_list(),
            inactive in token_list(),
            disabled in token_list(),
            is_active in any::<bool>(),
            is_disabled in any::<bool>(),
        ) {
            let first = resolve(&base, is_active, is_disabled, &active, &inactive, &disabled);
            let second = resolve(&base, is_active, is_disabled, &active, &inactive, &disabled);
            prop_assert_eq!(&first, &second);

            let expected = match (is_disabled, is_active) {
                (true, _) => base.concat(&disabled),
                (false, true) => base.concat(&active),
                (false, false) => base.concat(&inactive),
            };
            prop_assert_eq!(first, expected);
        }

        #[test]
        fn test_tw_is_idempotent(fragments in prop::collection::vec("[a-z:-]{0,12}( [a-z0-9:-]{1,12}){0,3}", 0..4)) {
            let once = tw(fragments.iter().map(String::as_str));
            let once_str = once.to_string();
            let twice = tw([once_str.as_str()]);
            prop_assert_eq!(once, twice);
        }
    }
}
