//! Shared UI components.
//!
//! # Data Flow
//! ```text
//! Page handler
//!     → component props (NavLink, Section, Button, DynamicImage, …)
//!     → render() → Element tree
//!     → element.rs (escaped HTML)
//! ```
//!
//! # Design Decisions
//! - Components render to an inspectable `Element`, never straight to strings
//! - Rendering is synchronous and pure except `DynamicImage::load_and_render`
//! - Class strings go through `class::tw` when extras merge over defaults

pub mod button;
pub mod class;
pub mod element;
pub mod image;
pub mod link;
pub mod nav_link;
pub mod section;

pub use button::Button;
pub use class::{resolve, tw, ClassSet, ClassTokens, StyleState};
pub use element::{Element, ElementKind, Node};
pub use image::{DynamicImage, ImageLoader, ImagePlaceholder};
pub use link::{AriaCurrent, Link, LinkAttributes, PrefetchState};
pub use nav_link::{render_link, NavLink};
pub use section::{LearnSection, Section};
