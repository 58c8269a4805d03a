//! Section content blocks.

use crate::ui::class::{tw, ClassSet};
use crate::ui::element::{Element, Node};

const SECTION_CLASS: &str = "container mx-auto p-5 flex flex-col gap-y-2 items-start";
const SECTION_HEADING_CLASS: &str = "text-3xl font-light";

/// A titled content section with a visible heading.
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    class: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            class: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Extra classes, merged over the defaults.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
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
        let mut section = Element::tag("section").with_classes(tw([
            SECTION_CLASS,
            self.class.as_deref().unwrap_or_default(),
        ]));
        for (name, value) in &self.attributes {
            section.set_attr(name.as_str(), value.as_str());
        }

        section
            .child(
                Element::tag("h1")
                    .with_classes(ClassSet::parse(SECTION_HEADING_CLASS))
                    .child(self.title.as_str()),
            )
            .children(self.children.iter().cloned())
    }
}

/// A section whose heading is only visible to screen readers unless
/// `show_title` is set.
#[derive(Debug, Clone)]
pub struct LearnSection {
    title: String,
    show_title: bool,
    heading_class: Option<String>,
    class: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl LearnSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show_title: false,
            heading_class: None,
            class: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn show_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    pub fn heading_class(mut self, class: impl Into<String>) -> Self {
        self.heading_class = Some(class.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
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
        let mut section = Element::tag("section")
            .with_classes(ClassSet::parse(self.class.as_deref().unwrap_or_default()));
        for (name, value) in &self.attributes {
            section.set_attr(name.as_str(), value.as_str());
        }

        let visibility = if self.show_title { "" } else { "sr-only" };
        let heading = Element::tag("h1")
            .with_classes(tw([visibility, self.heading_class.as_deref().unwrap_or_default()]))
            .child(self.title.as_str());

        section
            .child(heading)
            .children(self.children.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_merges_classes() {
        let html = Section::new("섹션 제목")
            .class("p-8 bg-white")
            .child(Element::tag("p").child("내용"))
            .render()
            .to_html();
        assert_eq!(
            html,
            "<section class=\"container mx-auto flex flex-col gap-y-2 items-start p-8 bg-white\">\
             <h1 class=\"text-3xl font-light\">섹션 제목</h1><p>내용</p></section>"
        );
    }

    #[test]
    fn test_learn_section_hides_title_by_default() {
        let el = LearnSection::new("학습 섹션").render();
        let heading = match &el.children[0] {
            Node::Element(h) => h.clone(),
            other => panic!("unexpected node {other:?}"),
        };
        assert!(heading.classes.contains("sr-only"));
        assert_eq!(heading.text(), "학습 섹션");
    }

    #[test]
    fn test_learn_section_visible_title() {
        let html = LearnSection::new("학습 섹션")
            .show_title(true)
            .heading_class("text-2xl")
            .class("bg-gray-100 p-4")
            .render()
            .to_html();
        assert_eq!(
            html,
            r#"<section class="bg-gray-100 p-4"><h1 class="text-2xl">학습 섹션</h1></section>"#
        );
    }
}
