use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Field, SignupForm};

pub const REQUIRED: &str = "Required";
pub const TOO_SHORT: &str = "Too Short!";
pub const TOO_LONG: &str = "Too Long!";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

// HTML living standard `input[type=email]` pattern.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// The predicate half of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Value must not be empty.
    Required,
    /// At least this many characters.
    MinChars(usize),
    /// At most this many characters.
    MaxChars(usize),
    /// Value must look like an email address.
    Email,
    /// Value must equal the value of another field.
    Matches(Field),
}

impl Check {
    /// Whether `value` passes. `form` is only read by cross-field checks.
    pub fn passes(&self, value: &str, form: &SignupForm) -> bool {
        match *self {
            Check::Required => !value.is_empty(),
            Check::MinChars(min) => value.chars().count() >= min,
            Check::MaxChars(max) => value.chars().count() <= max,
            Check::Email => EMAIL_PATTERN.is_match(value),
            Check::Matches(other) => value == form.get(other),
        }
    }
}

/// A predicate plus the message reported when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn new(check: Check, message: &'static str) -> Self {
        Self { check, message }
    }

    pub const fn required() -> Self {
        Self::new(Check::Required, REQUIRED)
    }

    pub const fn min_chars(min: usize) -> Self {
        Self::new(Check::MinChars(min), TOO_SHORT)
    }

    pub const fn max_chars(max: usize) -> Self {
        Self::new(Check::MaxChars(max), TOO_LONG)
    }

    pub const fn email() -> Self {
        Self::new(Check::Email, INVALID_EMAIL)
    }

    pub const fn matches(other: Field) -> Self {
        Self::new(Check::Matches(other), PASSWORDS_MUST_MATCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        let form = SignupForm::default();
        for good in ["a@b.com", "jo@doe.com", "first.last+tag@sub.example.org", "x@localhost"] {
            assert!(Check::Email.passes(good, &form), "{good} should be accepted");
        }
        for bad in ["not-an-email", "@b.com", "a@", "a@b..com", "a b@c.com", "a@-b.com"] {
            assert!(!Check::Email.passes(bad, &form), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_length_counts_characters() {
        let form = SignupForm::default();
        // Two characters, four bytes.
        assert!(Check::MinChars(2).passes("éé", &form));
        assert!(Check::MaxChars(2).passes("éé", &form));
        assert!(!Check::MaxChars(1).passes("éé", &form));
    }

    #[test]
    fn test_matches_reads_other_field() {
        let mut form = SignupForm::default();
        form.set(Field::Password, "p1");

        assert!(Check::Matches(Field::Password).passes("p1", &form));
        assert!(!Check::Matches(Field::Password).passes("p2", &form));
    }
}
