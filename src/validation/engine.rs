use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::rules::Rule;
use crate::domain::{Field, SignupForm};

/// Field → message map produced by validation. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Ordered rules per field.
///
/// For each field the rules are tried in order and the first failure is the
/// field's error; later rules for that field are not evaluated.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<(Field, Vec<Rule>)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rules for `field`, after any already registered for it.
    pub fn with(mut self, field: Field, rules: impl IntoIterator<Item = Rule>) -> Self {
        match self.rules.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => existing.extend(rules),
            None => self.rules.push((field, rules.into_iter().collect())),
        }
        self
    }

    /// The signup form's rules.
    pub fn signup() -> Self {
        Self::new()
            .with(Field::FirstName, [Rule::required(), Rule::min_chars(2), Rule::max_chars(50)])
            .with(Field::LastName, [Rule::required(), Rule::min_chars(2), Rule::max_chars(50)])
            .with(Field::Email, [Rule::required(), Rule::email()])
            .with(Field::Password, [Rule::required()])
            .with(Field::ConfirmPassword, [Rule::required(), Rule::matches(Field::Password)])
    }

    pub fn rules_for(&self, field: Field) -> &[Rule] {
        self.rules
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// First failing rule's message for one field, if any.
    pub fn validate_field(&self, field: Field, form: &SignupForm) -> Option<&'static str> {
        let value = form.get(field);
        self.rules_for(field)
            .iter()
            .find(|rule| !rule.check.passes(value, form))
            .map(|rule| rule.message)
    }

    pub fn validate(&self, form: &SignupForm) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for (field, _) in &self.rules {
            if let Some(message) = self.validate_field(*field, form) {
                errors.insert(*field, message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::*;

    fn valid_form() -> SignupForm {
        SignupForm::new("Jo", "Doe", "jo@doe.com", "secret1", "secret1")
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        let errors = RuleTable::signup().validate(&valid_form());
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn test_every_missing_field_is_required() {
        let errors = RuleTable::signup().validate(&SignupForm::default());

        assert_eq!(errors.len(), Field::ALL.len());
        for field in Field::ALL {
            assert_eq!(errors.get(field), Some(REQUIRED), "{field}");
        }
    }

    #[test]
    fn test_single_missing_field() {
        let table = RuleTable::signup();
        for field in Field::ALL {
            let mut form = valid_form();
            form.set(field, "");
            let errors = table.validate(&form);
            assert_eq!(errors.get(field), Some(REQUIRED), "{field}");
        }
    }

    #[test]
    fn test_name_length_bounds() {
        let table = RuleTable::signup();
        for field in [Field::FirstName, Field::LastName] {
            let mut form = valid_form();

            form.set(field, "J");
            assert_eq!(table.validate_field(field, &form), Some(TOO_SHORT));

            form.set(field, "J".repeat(51));
            assert_eq!(table.validate_field(field, &form), Some(TOO_LONG));

            for len in [2, 25, 50] {
                form.set(field, "J".repeat(len));
                assert_eq!(table.validate_field(field, &form), None, "{field} len {len}");
            }
        }
    }

    #[test]
    fn test_email_syntax() {
        let table = RuleTable::signup();
        let mut form = valid_form();

        form.set(Field::Email, "not-an-email");
        assert_eq!(table.validate(&form).get(Field::Email), Some(INVALID_EMAIL));

        form.set(Field::Email, "a@b.com");
        assert!(!table.validate(&form).contains(Field::Email));
    }

    #[test]
    fn test_confirmation_must_match() {
        let table = RuleTable::signup();
        let mut form = valid_form();

        form.set(Field::Password, "p1");
        form.set(Field::ConfirmPassword, "p2");
        assert_eq!(
            table.validate(&form).get(Field::ConfirmPassword),
            Some(PASSWORDS_MUST_MATCH)
        );

        form.set(Field::ConfirmPassword, "p1");
        assert!(table.validate(&form).is_empty());
    }

    #[test]
    fn test_empty_password_reports_both_fields() {
        let mut form = valid_form();
        form.set(Field::Password, "");

        let errors = RuleTable::signup().validate(&form);
        assert_eq!(errors.get(Field::Password), Some(REQUIRED));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORDS_MUST_MATCH));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let table = RuleTable::signup();
        let form = SignupForm::new("J", "", "nope", "p1", "p2");

        assert_eq!(table.validate(&form), table.validate(&form));
    }

    #[test]
    fn test_errors_serialize_with_wire_names() {
        let form = SignupForm::new("Jo", "Doe", "jo@doe.com", "p1", "p2");
        let json = serde_json::to_value(RuleTable::signup().validate(&form)).unwrap();

        assert_eq!(json, serde_json::json!({ "confirm_password": "Passwords must match" }));
    }
}
