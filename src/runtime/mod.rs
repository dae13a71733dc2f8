//! Tokio host that owns one widget, feeds it terminal input and executes
//! the commands it returns.

mod component;
mod dispatcher;
mod display_case;
mod tasks;

#[cfg(test)]
mod tests;

pub use component::Widget;
pub use dispatcher::{AppMessage, Dispatcher};
pub use display_case::{DisplayCase, Outcome};
pub use tasks::{DefaultRuntimeDriver, RuntimeDriver};
