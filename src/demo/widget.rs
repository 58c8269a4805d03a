//! The RandomCountUp widget.

use crate::demo::random::{app_color_style, RandomCount};
use crate::ui::{Button, ClassSet, Element};

/// Renders a drawn count and a control that draws a new one.
#[derive(Debug, Clone)]
pub struct RandomCountUp {
    draw: RandomCount,
    min: u32,
    max: u32,
}

impl RandomCountUp {
    pub fn new(draw: RandomCount, min: u32, max: u32) -> Self {
        Self { draw, min, max }
    }

    pub fn render(&self) -> Element {
        let count = Element::tag("output")
            .with_classes(ClassSet::parse("text-6xl font-bold"))
            .attr("aria-live", "polite")
            .child(self.draw.count.to_string());

        let reload = Element::tag("form")
            .attr("method", "get")
            .attr("action", "/")
            .child(
                Button::new()
                    .class("rounded px-4 py-2")
                    .attr("type", "submit")
                    .child("다시 뽑기")
                    .render(),
            );

        Element::tag("div")
            .with_classes(ClassSet::parse("random-count-up flex flex-col items-center gap-y-4"))
            .attr("style", app_color_style(self.draw.hue))
            .attr("data-min", self.min.to_string())
            .attr("data-max", self.max.to_string())
            .child(count)
            .child(reload)
    }
}
