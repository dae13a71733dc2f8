use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::{Command, Message};
use crate::prompt::{TextPrompt, TextPromptArgs};
use crate::validation::{StringValidator, ValidationError, ValidationResult, max_len, none};

pub(super) fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub(super) fn enter() -> Message {
    key(KeyCode::Enter)
}

pub(super) fn ctrl_c() -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

pub(super) fn type_str(prompt: &mut TextPrompt, text: &str) -> Vec<Option<Command>> {
    text.chars()
        .map(|c| prompt.handle(key(KeyCode::Char(c))))
        .collect()
}

pub(super) fn reject_empty() -> StringValidator {
    StringValidator::new(|value: &str| -> ValidationResult {
        if value.is_empty() {
            Err(ValidationError::new("value required"))
        } else {
            Ok(())
        }
    })
}

pub(super) fn rejects_digits() -> StringValidator {
    StringValidator::new(|value: &str| -> ValidationResult {
        if value.chars().any(|c| c.is_ascii_digit()) {
            Err(ValidationError::new("letters only"))
        } else {
            Ok(())
        }
    })
}

/// Prompt from the "too long" scenario: empty rejected on confirm, more
/// than five chars flagged while typing.
pub(super) fn scenario_prompt() -> TextPrompt {
    let mut prompt = TextPrompt::new(
        "name",
        TextPromptArgs {
            placeholder: "default".into(),
            prompt: "What should we call it?".into(),
            tag: "name".into(),
            validator: reject_empty(),
            in_flight_validator: max_len(5, "too long"),
            ..TextPromptArgs::default()
        },
    );
    prompt.focus();
    prompt
}

/// Validator that counts how often it runs and which values it saw.
#[derive(Clone, Default)]
pub(super) struct Recorder {
    calls: Arc<AtomicUsize>,
    seen: Arc<std::sync::Mutex<Vec<String>>>,
}

impl Recorder {
    pub(super) fn validator(&self) -> StringValidator {
        let calls = self.calls.clone();
        let seen = self.seen.clone();
        StringValidator::new(move |value: &str| -> ValidationResult {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().expect("recorder lock").push(value.to_string());
            Ok(())
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("recorder lock").clone()
    }
}

pub(super) fn prompt_with(
    validator: StringValidator,
    in_flight: StringValidator,
    placeholder: &str,
) -> TextPrompt {
    let mut prompt = TextPrompt::new(
        "field",
        TextPromptArgs {
            placeholder: placeholder.into(),
            validator,
            in_flight_validator: in_flight,
            ..TextPromptArgs::default()
        },
    );
    prompt.focus();
    prompt
}

pub(super) fn permissive() -> StringValidator {
    none()
}
