use std::fmt;

use crate::domain::{Field, InputKind};
use crate::form::FormState;

pub const TITLE: &str = "Signup";
pub const SUBMIT_LABEL: &str = "Submit";
pub const SUBMITTING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    /// Value as displayed; password inputs are masked.
    pub display_value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

/// One frame of the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    pub title: &'static str,
    pub fields: Vec<RenderedField>,
    pub button: SubmitButton,
}

impl RenderedForm {
    #[allow(dead_code)]
    pub fn field(&self, field: Field) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.name == field.name())
    }
}

pub fn render(state: &FormState) -> RenderedForm {
    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            let value = state.values().get(field);
            let display_value = match field.input_kind() {
                InputKind::Password => "*".repeat(value.chars().count()),
                InputKind::Text | InputKind::Email => value.to_string(),
            };
            RenderedField {
                name: field.name(),
                label: field.label(),
                input: field.input_kind(),
                display_value,
                error: state.visible_error(field).map(str::to_string),
            }
        })
        .collect();

    RenderedForm {
        title: TITLE,
        fields,
        button: submit_button(state),
    }
}

pub fn submit_button(state: &FormState) -> SubmitButton {
    if state.is_submitting() {
        SubmitButton { label: SUBMITTING_LABEL, disabled: true }
    } else {
        SubmitButton { label: SUBMIT_LABEL, disabled: false }
    }
}

impl fmt::Display for RenderedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for field in &self.fields {
            writeln!(f, "{} ({}): {}", field.label, field.input, field.display_value)?;
            if let Some(error) = &field.error {
                writeln!(f, "  ! {}", error)?;
            }
        }
        if self.button.disabled {
            write!(f, "[{}] (disabled)", self.button.label)
        } else {
            write!(f, "[{}]", self.button.label)
        }
    }
}
