//! Page composition.
//!
//! Pages are rendered inside a shared layout: document head, font
//! stylesheet, the navigation bar marked for the current location, and
//! the page body in `<main>`.

use crate::config::{NavEntry, SiteConfig};
use crate::demo::{format_title, RandomCount, RandomCountUp};
use crate::fonts::{variable_classes, Font};
use crate::routing::Route;
use crate::ui::{ClassSet, Element, LearnSection, NavLink, Node, Section};

/// A rendered page body with its document title.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub body: Element,
}

/// Build the nav link for a configured entry.
pub fn nav_link_for(entry: &NavEntry) -> NavLink {
    let mut link = NavLink::new(entry.href.clone())
        .label(entry.label.as_str())
        .exact(entry.exact)
        .disabled(entry.disabled);
    if let Some(class) = &entry.class {
        link = link.class(class);
    }
    if let Some(class) = &entry.active_class {
        link = link.active_class(class);
    }
    if let Some(class) = &entry.inactive_class {
        link = link.inactive_class(class);
    }
    if let Some(class) = &entry.disabled_class {
        link = link.disabled_class(class);
    }
    link
}

pub fn navigation(entries: &[NavEntry], current: &Route) -> Element {
    let items = entries.iter().map(|entry| {
        Node::Element(Element::tag("li").child(nav_link_for(entry).render(current)))
    });

    Element::tag("nav")
        .attr("aria-label", "주요 메뉴")
        .child(
            Element::tag("ul")
                .with_classes(ClassSet::parse("flex gap-x-4"))
                .children(items),
        )
}

/// The enabled, non-root entry whose link is active at `current`.
pub fn find_entry<'a>(entries: &'a [NavEntry], current: &Route) -> Option<&'a NavEntry> {
    entries
        .iter()
        .filter(|entry| !entry.disabled && !entry.href.is_root())
        .find(|entry| nav_link_for(entry).is_active(current))
}

pub fn home_page(config: &SiteConfig, draw: RandomCount, hero: Option<Element>) -> Page {
    let mut section = LearnSection::new("랜덤 카운트 앱").class("min-h-screen grid place-content-center");
    if let Some(hero) = hero {
        section = section.child(hero);
    }
    let section = section.child(RandomCountUp::new(draw, config.demo.min, config.demo.max).render());

    Page {
        title: format_title(draw.count, &config.site.title),
        body: section.render(),
    }
}

pub fn section_page(config: &SiteConfig, entry: &NavEntry, current: &Route) -> Page {
    let mut section = Section::new(entry.label.as_str());
    if current != &entry.href {
        section = section.child(
            Element::tag("p")
                .with_classes(ClassSet::parse("text-gray-500"))
                .child(format!("현재 경로: {current}")),
        );
    }

    Page {
        title: format!("{} | {}", entry.label, config.site.title),
        body: section.render(),
    }
}

pub fn not_found_page(config: &SiteConfig, current: &Route) -> Page {
    Page {
        title: format!("404 | {}", config.site.title),
        body: Section::new("페이지를 찾을 수 없습니다")
            .child(Element::tag("p").child(format!("{current} 경로에 해당하는 페이지가 없습니다.")))
            .render(),
    }
}

/// Wrap a page in the document layout.
pub fn layout(config: &SiteConfig, fonts: &[Font], current: &Route, page: &Page) -> String {
    let head = Element::tag("head")
        .child(Element::tag("meta").attr("charset", "utf-8"))
        .child(
            Element::tag("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::tag("title").child(page.title.as_str()))
        .child(
            Element::tag("link")
                .attr("rel", "stylesheet")
                .attr("href", "/fonts.css"),
        );

    let body = Element::tag("body")
        .with_classes(variable_classes(fonts))
        .child(Element::tag("header").child(navigation(&config.navigation, current)))
        .child(Element::tag("main").child(page.body.clone()));

    let html = Element::tag("html")
        .attr("lang", config.site.lang.as_str())
        .child(head)
        .child(body);

    format!("<!DOCTYPE html>{html}")
}
