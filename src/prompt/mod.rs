//! A labelled, validated single-line prompt.
//!
//! Two validators run at different times. The in-flight validator runs
//! after every edit that changes the value and gives advisory feedback
//! while typing. The final validator runs only when the user confirms and
//! gates the [`Completion`]. Both write to the same error slot, last write
//! wins. An empty field is neutral: clearing it clears the error, and only
//! a confirm decides whether empty is acceptable.

use std::time::Duration;

use tracing::{debug, trace};

use crate::events::{Command, Completion, Message};
use crate::keymap::{Action, KeyMap};
use crate::styles::Theme;
use crate::text_input::{DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH, TextInput};
use crate::validation::{StringValidator, ValidationError};
use crate::view::{Fragment, Layout, when_or};

#[cfg(test)]
mod tests;

/// Construction parameters for [`TextPrompt`].
#[derive(Clone, Debug, Default)]
pub struct TextPromptArgs {
    /// Shown while empty, and committed when confirming an empty field.
    pub placeholder: String,
    pub prompt: String,
    pub tag: String,
    /// Runs on confirm.
    pub validator: StringValidator,
    /// Runs after each content-changing edit.
    pub in_flight_validator: StringValidator,
    pub keymap: KeyMap,
}

#[derive(Clone, Debug)]
pub struct TextPrompt {
    id: String,
    input: TextInput,
    prompt: String,
    tag: String,
    keymap: KeyMap,
    validate: StringValidator,
    validate_in_flight: StringValidator,
    focused: bool,
    previous: String,
    err: Option<ValidationError>,
}

impl TextPrompt {
    pub fn new(id: impl Into<String>, args: TextPromptArgs) -> Self {
        let input = TextInput::new()
            .with_char_limit(DEFAULT_CHAR_LIMIT)
            .with_width(DEFAULT_WIDTH)
            .with_placeholder(args.placeholder);
        Self {
            id: id.into(),
            input,
            prompt: args.prompt,
            tag: args.tag,
            keymap: args.keymap,
            validate: args.validator,
            validate_in_flight: args.in_flight_validator,
            focused: false,
            previous: String::new(),
            err: None,
        }
    }

    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.input = self.input.with_blink_interval(interval);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn placeholder(&self) -> &str {
        self.input.placeholder()
    }

    pub fn err(&self) -> Option<&ValidationError> {
        self.err.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Starts the caret blink timer.
    pub fn init(&self) -> Command {
        self.input.blink()
    }

    /// Accepts keyboard input and shows the cursor.
    pub fn focus(&mut self) -> Command {
        self.focused = true;
        self.input.focus()
    }

    /// Stops accepting keyboard input and hides the cursor.
    pub fn blur(&mut self) {
        self.focused = false;
        self.input.blur();
    }

    /// Pre-fills the field. Does not validate.
    pub fn set_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    pub fn value(&self) -> String {
        self.input.value()
    }

    pub fn update(mut self, message: Message) -> (Self, Option<Command>) {
        let command = self.handle(message);
        (self, command)
    }

    /// In-place form of [`TextPrompt::update`].
    pub fn handle(&mut self, message: Message) -> Option<Command> {
        match &message {
            Message::Key(key) => {
                if self.keymap.matches(key, Action::Quit) {
                    debug!(id = %self.id, "quit requested");
                    return Some(Command::Quit);
                }
                if self.focused && self.keymap.matches(key, Action::Confirm) {
                    if let Some(completion) = self.submit() {
                        return Some(Command::Complete(completion));
                    }
                }
            }
            Message::Error(err) => {
                debug!(id = %self.id, error = %err, "error injected");
                self.err = Some(err.clone());
                return None;
            }
            Message::Paste(_) | Message::Mouse(_) | Message::Resize(..) | Message::Blink(_) => {}
        }

        let command = self.input.update(&message);

        let value = self.input.value();
        if value != self.previous {
            self.err = if value.is_empty() {
                None
            } else {
                self.validate_in_flight.validate(&value).err()
            };
            trace!(id = %self.id, valid = self.err.is_none(), "value changed");
            self.previous = value;
        }

        command
    }

    fn submit(&mut self) -> Option<Completion> {
        if self.input.is_empty() {
            let placeholder = self.input.placeholder().to_string();
            self.input.set_value(&placeholder);
        }

        let value = self.input.value();
        self.err = self.validate.validate(&value).err();
        if let Some(err) = &self.err {
            debug!(id = %self.id, error = %err, "submission rejected");
            return None;
        }

        self.blur();
        self.previous.clone_from(&value);
        debug!(id = %self.id, "submission accepted");
        Some(Completion {
            id: self.id.clone(),
            value,
        })
    }

    pub fn render(&self, theme: &Theme) -> Layout {
        let mut layout = Layout::new();

        layout
            .add_row([
                Fragment::text(self.tag.as_str()).with_style(theme.tag),
                Fragment::text(self.prompt.as_str()).with_style(theme.prompt),
            ])
            .with_style(theme.label);

        let error = match &self.err {
            Some(err) => Fragment::text(err.message()).with_style(theme.error),
            None => Fragment::Empty,
        };
        layout
            .add_row([
                when_or(
                    self.input.focused(),
                    || {
                        let view = self.input.view();
                        let style = if view.placeholder {
                            theme.placeholder
                        } else {
                            theme.input
                        };
                        Fragment::input(view, style, theme.cursor)
                    },
                    || Fragment::text(self.input.value()).with_style(theme.text),
                ),
                error,
            ])
            .with_style(theme.value_row);

        layout
    }
}
