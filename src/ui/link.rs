//! Navigable link primitive with hover-primed prefetching.
//!
//! A freshly rendered link does not prefetch its destination. The first
//! hover (or other intent signal) primes it, after which the framework's
//! default prefetch behavior applies. Priming is one-way per instance.

use serde::{Deserialize, Serialize};

use crate::routing::Route;
use crate::ui::class::ClassSet;
use crate::ui::element::{Element, ElementKind, Node};

/// Prefetch state of one rendered link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefetchState {
    /// No intent observed, prefetch disabled.
    #[default]
    Idle,
    /// Intent observed, prefetch enabled.
    Primed,
}

/// Values accepted by `aria-current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaCurrent {
    False,
    True,
    Page,
    Step,
    Location,
    Date,
    Time,
}

impl AriaCurrent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AriaCurrent::False => "false",
            AriaCurrent::True => "true",
            AriaCurrent::Page => "page",
            AriaCurrent::Step => "step",
            AriaCurrent::Location => "location",
            AriaCurrent::Date => "date",
            AriaCurrent::Time => "time",
        }
    }
}

/// Accessibility and passthrough attributes for a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    pub aria_label: Option<String>,
    pub aria_current: Option<AriaCurrent>,
    pub aria_describedby: Option<String>,
    pub aria_details: Option<String>,
    pub aria_disabled: Option<bool>,
    pub aria_hidden: Option<bool>,
    /// Any other attribute, emitted verbatim after the aria ones.
    pub extra: Vec<(String, String)>,
}

impl LinkAttributes {
    fn apply(&self, el: &mut Element) {
        if let Some(label) = &self.aria_label {
            el.set_attr("aria-label", label.as_str());
        }
        if let Some(current) = self.aria_current {
            el.set_attr("aria-current", current.as_str());
        }
        if let Some(id) = &self.aria_describedby {
            el.set_attr("aria-describedby", id.as_str());
        }
        if let Some(id) = &self.aria_details {
            el.set_attr("aria-details", id.as_str());
        }
        if let Some(disabled) = self.aria_disabled {
            el.set_attr("aria-disabled", disabled.to_string());
        }
        if let Some(hidden) = self.aria_hidden {
            el.set_attr("aria-hidden", hidden.to_string());
        }
        for (name, value) in &self.extra {
            el.set_attr(name.as_str(), value.as_str());
        }
    }
}

/// A navigable element pointing at `href`.
#[derive(Debug, Clone)]
pub struct Link {
    href: Route,
    classes: ClassSet,
    attributes: LinkAttributes,
    children: Vec<Node>,
    prefetch: PrefetchState,
}

impl Link {
    pub fn new(href: Route) -> Self {
        Self {
            href,
            classes: ClassSet::new(),
            attributes: LinkAttributes::default(),
            children: Vec::new(),
            prefetch: PrefetchState::Idle,
        }
    }

    pub fn classes(mut self, classes: ClassSet) -> Self {
        self.classes = classes;
        self
    }

    pub fn attributes(mut self, attributes: LinkAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn aria_current(mut self, current: Option<AriaCurrent>) -> Self {
        self.attributes.aria_current = current;
        self
    }

    pub fn children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn href(&self) -> &Route {
        &self.href
    }

    pub fn prefetch_state(&self) -> PrefetchState {
        self.prefetch
    }

    /// Pointer hover or equivalent intent. Idle → Primed, never back.
    pub fn on_intent(&mut self) {
        if self.prefetch == PrefetchState::Idle {
            tracing::trace!(href = %self.href, "Link primed for prefetch");
            self.prefetch = PrefetchState::Primed;
        }
    }

    pub fn render(&self) -> Element {
        let mut el = Element::new("a", ElementKind::Navigable)
            .with_classes(self.classes.clone())
            .attr("href", self.href.as_str());
        if self.prefetch == PrefetchState::Idle {
            el.set_attr("data-prefetch", "false");
        }
        self.attributes.apply(&mut el);
        el.children(self.children.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Link {
        Link::new(Route::new("/products").unwrap()).children(vec!["상품 목록".into()])
    }

    #[test]
    fn test_idle_link_disables_prefetch() {
        let html = link().render().to_html();
        assert_eq!(html, r#"<a href="/products" data-prefetch="false">상품 목록</a>"#);
    }

    #[test]
    fn test_intent_primes_once() {
        let mut link = link();
        assert_eq!(link.prefetch_state(), PrefetchState::Idle);
        link.on_intent();
        link.on_intent();
        assert_eq!(link.prefetch_state(), PrefetchState::Primed);
        assert!(link.render().get_attr("data-prefetch").is_none());
    }

    #[test]
    fn test_passthrough_attributes() {
        let attrs = LinkAttributes {
            aria_label: Some("서비스 문의".into()),
            aria_hidden: Some(false),
            extra: vec![("id".into(), "contact".into())],
            ..Default::default()
        };
        let el = Link::new(Route::new("/contact").unwrap())
            .attributes(attrs)
            .aria_current(Some(AriaCurrent::Page))
            .render();
        assert_eq!(el.kind, ElementKind::Navigable);
        assert_eq!(el.get_attr("aria-label"), Some("서비스 문의"));
        assert_eq!(el.get_attr("aria-current"), Some("page"));
        assert_eq!(el.get_attr("aria-hidden"), Some("false"));
        assert_eq!(el.get_attr("id"), Some("contact"));
    }

    #[test]
    fn test_extra_attribute_cannot_inject_markup() {
        let attrs = LinkAttributes {
            extra: vec![
                ("x><img src=x onerror=alert(1)".into(), "1".into()),
                ("data-track".into(), "nav".into()),
            ],
            ..Default::default()
        };
        let html = link().attributes(attrs).render().to_html();
        assert_eq!(
            html,
            r#"<a href="/products" data-prefetch="false" data-track="nav">상품 목록</a>"#
        );
    }
}
