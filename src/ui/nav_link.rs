//! Navigation links that know whether they point at the current page.
//!
//! # Data Flow
//! ```text
//! NavLink props + current location
//!     → routing::is_active (Exact / PrefixOrExact)
//!     → class::resolve (base + state tokens)
//!     → render_link (span for disabled, Link for enabled)
//!     → Element
//! ```

use crate::observability::metrics;
use crate::routing::{is_active, MatchMode, Route};
use crate::ui::class::{resolve, ClassSet, ClassTokens, StyleState};
use crate::ui::element::{Element, ElementKind, Node};
use crate::ui::link::{AriaCurrent, Link, LinkAttributes};

/// Render the final element for a navigation target.
///
/// Disabled targets become a non-navigable `span` that still announces
/// itself as a link; enabled targets become a [`Link`] with
/// `aria-current="page"` when active. Caller attributes are applied to the
/// enabled link only and win over the computed `aria-current`.
pub fn render_link(
    target: &Route,
    is_disabled: bool,
    resolved_classes: ClassSet,
    is_active: bool,
    children: Vec<Node>,
    attributes: &LinkAttributes,
) -> Element {
    if is_disabled {
        return Element::new("span", ElementKind::NonNavigable)
            .with_classes(resolved_classes)
            .attr("aria-disabled", "true")
            .attr("role", "link")
            .children(children);
    }

    let mut attributes = attributes.clone();
    if attributes.aria_current.is_none() && is_active {
        attributes.aria_current = Some(AriaCurrent::Page);
    }

    Link::new(target.clone())
        .classes(resolved_classes)
        .attributes(attributes)
        .children(children)
        .render()
}

/// A navigation link.
#[derive(Debug, Clone)]
pub struct NavLink {
    href: Route,
    children: Vec<Node>,
    tokens: ClassTokens,
    mode: MatchMode,
    disabled: bool,
    attributes: LinkAttributes,
}

impl NavLink {
    pub fn new(href: Route) -> Self {
        Self {
            href,
            children: Vec::new(),
            tokens: ClassTokens::default(),
            mode: MatchMode::PrefixOrExact,
            disabled: false,
            attributes: LinkAttributes::default(),
        }
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.tokens.base = ClassSet::parse(classes);
        self
    }

    pub fn active_class(mut self, classes: &str) -> Self {
        self.tokens.active = ClassSet::parse(classes);
        self
    }

    pub fn inactive_class(mut self, classes: &str) -> Self {
        self.tokens.inactive = ClassSet::parse(classes);
        self
    }

    pub fn disabled_class(mut self, classes: &str) -> Self {
        self.tokens.disabled = ClassSet::parse(classes);
        self
    }

    /// Only the exact path counts as active.
    pub fn exact(mut self, exact: bool) -> Self {
        self.mode = MatchMode::from_exact(exact);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn attributes(mut self, attributes: LinkAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn href(&self) -> &Route {
        &self.href
    }

    pub fn is_active(&self, current_location: &Route) -> bool {
        is_active(current_location, &self.href, self.mode)
    }

    pub fn render(&self, current_location: &Route) -> Element {
        let active = self.is_active(current_location);
        let classes = resolve(
            &self.tokens.base,
            active,
            self.disabled,
            &self.tokens.active,
            &self.tokens.inactive,
            &self.tokens.disabled,
        );

        let state = StyleState::from_flags(active, self.disabled);
        metrics::record_nav_link(state);
        tracing::trace!(
            href = %self.href,
            location = %current_location,
            state = state.as_str(),
            "Rendering nav link"
        );

        render_link(
            &self.href,
            self.disabled,
            classes,
            active,
            self.children.clone(),
            &self.attributes,
        )
    }
}
