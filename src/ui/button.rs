//! Plain buttons.

use crate::ui::class::ClassSet;
use crate::ui::element::{Element, Node};

/// A `<button type="button">` with passthrough attributes.
#[derive(Debug, Clone, Default)]
pub struct Button {
    classes: ClassSet,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.classes = ClassSet::parse(classes);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn render(&self) -> Element {
        let mut el = Element::tag("button")
            .with_classes(self.classes.clone())
            .attr("type", "button");
        for (name, value) in &self.attributes {
            el.set_attr(name.as_str(), value.as_str());
        }
        el.children(self.children.iter().cloned())
    }
}
