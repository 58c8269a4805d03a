//! Random count demo.
//!
//! # Data Flow
//! ```text
//! GET / or /api/random-count
//!     → random.rs (count in [min, max], hue in [0, 360])
//!     → title.rs (debounced "(count) title")
//!     → widget.rs (RandomCountUp element)
//! ```

pub mod random;
pub mod title;
pub mod widget;

pub use random::{app_color_style, get_random_count, get_random_hue_color, RandomCount};
pub use title::{format_title, TitleSetter};
pub use widget::RandomCountUp;
