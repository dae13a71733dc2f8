use std::fmt;
use std::sync::Arc;

use thiserror::Error;


/// Failure reported by a [`Validator`]. The message is shown verbatim
/// beneath the field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// A pure, synchronous check over the current field value.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}

/// Shared handle to a validator, cheap to clone alongside the prompt.
#[derive(Clone)]
pub struct StringValidator(Arc<dyn Validator>);

impl StringValidator {
    pub fn new<V>(validator: V) -> Self
    where
        V: Validator + 'static,
    {
        Self(Arc::new(validator))
    }

    pub fn validate(&self, value: &str) -> ValidationResult {
        self.0.validate(value)
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        none()
    }
}

impl fmt::Debug for StringValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StringValidator(..)")
    }
}

/// Accepts every value.
pub fn none() -> StringValidator {
    StringValidator::new(|_: &str| -> ValidationResult { Ok(()) })
}

pub fn not_empty(message: impl Into<String>) -> StringValidator {
    let message = message.into();
    StringValidator::new(move |value: &str| {
        if value.is_empty() {
            Err(ValidationError::new(message.clone()))
        } else {
            Ok(())
        }
    })
}

/// Rejects values longer than `max` characters (not bytes).
pub fn max_len(max: usize, message: impl Into<String>) -> StringValidator {
    let message = message.into();
    StringValidator::new(move |value: &str| {
        if value.chars().count() > max {
            Err(ValidationError::new(message.clone()))
        } else {
            Ok(())
        }
    })
}

/// Runs each validator in order and reports the first failure.
pub fn all<I>(validators: I) -> StringValidator
where
    I: IntoIterator<Item = StringValidator>,
{
    let chain: Vec<StringValidator> = validators.into_iter().collect();
    StringValidator::new(move |value: &str| {
        chain
            .iter()
            .try_for_each(|validator| validator.validate(value))
    })
}
