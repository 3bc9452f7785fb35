use std::collections::BTreeSet;

use crate::domain::{Field, SignupForm, SignupPayload};
use crate::validation::{FieldErrors, RuleTable};

/// Whether a submission is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// Everything the form tracks between input events.
///
/// All mutation goes through the transition methods below, which keep
/// `errors` in step with `values`.
#[derive(Debug, Clone)]
pub struct FormState {
    values: SignupForm,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submitting: bool,
    submit_count: u32,
    rules: RuleTable,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::with_rules(RuleTable::signup())
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        let values = SignupForm::default();
        let errors = rules.validate(&values);
        Self {
            values,
            errors,
            touched: BTreeSet::new(),
            submitting: false,
            submit_count: 0,
            rules,
        }
    }

    pub fn values(&self) -> &SignupForm {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[allow(dead_code)]
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn phase(&self) -> Phase {
        if self.submitting {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }

    /// The error to show next to `field`: only once the user has been there.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        self.revalidate();
    }

    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// Attempts `Idle → Submitting`.
    ///
    /// Every field becomes touched so all errors show. On a valid record the
    /// in-flight flag is raised and the payload to send is returned.
    pub fn begin_submit(&mut self) -> Result<SignupPayload, FieldErrors> {
        self.submit_count += 1;
        self.touched.extend(Field::ALL);
        self.revalidate();

        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        self.submitting = true;
        Ok(self.values.to_payload())
    }

    /// `Submitting → Idle`.
    ///
    /// A successful submission discards the record. A failed one keeps the
    /// values and touched state so the user can press submit again; nothing
    /// is retried automatically.
    pub fn settle(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.values = SignupForm::default();
            self.touched.clear();
            self.revalidate();
        }
    }

    fn revalidate(&mut self) {
        self.errors = self.rules.validate(&self.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{PASSWORDS_MUST_MATCH, REQUIRED, TOO_SHORT};

    fn fill(state: &mut FormState, values: [&str; 5]) {
        for (field, value) in Field::ALL.into_iter().zip(values) {
            state.set_value(field, value);
        }
    }

    #[test]
    fn test_fresh_state_is_idle_and_hides_errors() {
        let state = FormState::new();

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.errors().len(), Field::ALL.len());
        for field in Field::ALL {
            assert_eq!(state.visible_error(field), None);
        }
    }

    #[test]
    fn test_errors_show_after_blur() {
        let mut state = FormState::new();
        state.set_value(Field::FirstName, "J");
        assert_eq!(state.visible_error(Field::FirstName), None);

        state.blur(Field::FirstName);
        assert_eq!(state.visible_error(Field::FirstName), Some(TOO_SHORT));
        assert_eq!(state.visible_error(Field::LastName), None);
    }

    #[test]
    fn test_change_revalidates_dependent_field() {
        let mut state = FormState::new();
        fill(&mut state, ["Jo", "Doe", "jo@doe.com", "p1", "p1"]);
        assert!(state.errors().is_empty());

        state.set_value(Field::Password, "p2");
        assert_eq!(state.errors().get(Field::ConfirmPassword), Some(PASSWORDS_MUST_MATCH));
    }

    #[test]
    fn test_invalid_submit_stays_idle_and_touches_everything() {
        let mut state = FormState::new();
        fill(&mut state, ["Jo", "Doe", "jo@doe.com", "", "secret1"]);

        let errors = state.begin_submit().unwrap_err();

        assert_eq!(errors.get(Field::Password), Some(REQUIRED));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.submit_count(), 1);
        assert!(Field::ALL.iter().all(|f| state.is_touched(*f)));
        assert_eq!(state.visible_error(Field::Password), Some(REQUIRED));
    }

    #[test]
    fn test_valid_submit_then_success_resets() {
        let mut state = FormState::new();
        fill(&mut state, ["Jo", "Doe", "jo@doe.com", "secret1", "secret1"]);

        let payload = state.begin_submit().unwrap();
        assert_eq!(payload.email, "jo@doe.com");
        assert!(state.is_submitting());

        state.settle(true);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.values(), &SignupForm::default());
        assert!(!state.is_touched(Field::Email));
        assert_eq!(state.submit_count(), 1);
    }

    #[test]
    fn test_failure_keeps_values() {
        let mut state = FormState::new();
        fill(&mut state, ["Jo", "Doe", "jo@doe.com", "secret1", "secret1"]);
        state.begin_submit().unwrap();

        state.settle(false);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.values().first_name, "Jo");
        assert!(state.errors().is_empty());
    }
}
