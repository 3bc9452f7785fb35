//! Declarative field validation: a rule table evaluated by a pure engine.

pub mod engine;
pub mod rules;

pub use engine::*;

use crate::domain::SignupForm;

/// Validates `form` against the signup rule table.
pub fn validate(form: &SignupForm) -> FieldErrors {
    RuleTable::signup().validate(form)
}
