//! Small async helpers.

pub mod measure;
pub mod wait;

pub use measure::measure_time;
pub use wait::{wait, WaitError, WaitOptions};
