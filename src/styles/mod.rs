mod computed;
mod parser;
mod stylesheet;
mod theme;

pub use computed::ComputedStyle;
pub use stylesheet::{StyleError, StyleQuery, Stylesheet};
pub use theme::{FragmentStyle, Theme};
