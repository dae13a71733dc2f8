pub mod config;
pub mod events;
pub mod keymap;
pub mod prompt;
pub mod renderer;
pub mod runtime;
pub mod styles;
pub mod text_input;
pub mod validation;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use events::{BlinkTick, Command, Completion, Message};
pub use keymap::{Action, KeyBinding, KeyChord, KeyMap};
pub use prompt::{TextPrompt, TextPromptArgs};
pub use runtime::{DisplayCase, Outcome, RuntimeDriver, Widget};
pub use styles::{FragmentStyle, StyleError, Stylesheet, Theme};
pub use text_input::{InputView, TextInput};
pub use validation::{StringValidator, ValidationError, ValidationResult, Validator};
pub use view::{Fragment, Layout};
