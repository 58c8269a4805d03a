//! Render-ready element descriptions and HTML serialization.

use std::fmt::{self, Write};

use crate::ui::class::ClassSet;

/// What a rendered element does when interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Follows `href` when activated (`<a>`).
    Navigable,
    /// Looks like a link but cannot be followed.
    NonNavigable,
    /// Plain structural or content element.
    Static,
}

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-rendered markup, emitted without escaping.
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An HTML element with its style tokens and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub kind: ElementKind,
    pub classes: ClassSet,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "meta", "link", "br", "hr", "input"];

impl Element {
    pub fn new(tag: &'static str, kind: ElementKind) -> Self {
        Self {
            tag,
            kind,
            classes: ClassSet::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for a [`ElementKind::Static`] element.
    pub fn tag(tag: &'static str) -> Self {
        Self::new(tag, ElementKind::Static)
    }

    pub fn with_classes(mut self, classes: ClassSet) -> Self {
        self.classes = classes;
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Names that could break out of the tag are dropped.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !is_valid_attr_name(&name) {
            tracing::warn!(tag = self.tag, name = %name.escape_debug(), "Dropping invalid attribute name");
            return;
        }
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Element(el) => out.push_str(&el.text()),
                Node::Text(text) => out.push_str(text),
                Node::Raw(_) => {}
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", escape(&self.classes.to_string()))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        f.write_char('>')?;

        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }

        for child in &self.children {
            match child {
                Node::Element(el) => write!(f, "{el}")?,
                Node::Text(text) => f.write_str(&escape(text))?,
                Node::Raw(html) => f.write_str(html)?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Whether `name` is safe to write unquoted as an attribute name.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '='))
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
