//! Field validation. Classification is pure; [`validate_field`] additionally
//! writes the resulting tag to the view for styling. Values are never modified.
//!
//! The two forms use different rule sets:
//!
//! - login: email must match, password must be at least six characters once
//!   trimmed; an empty value is invalid.
//! - registration: an empty email gets no tag, a non-empty one must match;
//!   other required fields must be non-empty; optional fields get no tag.

use super::{
    field::{Field, FieldKind, FieldSpec, Validity},
    view::FormView,
};
use regex::Regex;

/// Minimum trimmed password length accepted by the login form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ruleset {
    Login,
    Registration,
}

/// Permissive single-at, single-dot email shape; not RFC 5322.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Length is counted in chars, so an emoji counts once rather than as two UTF-16 units.
#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.trim().chars().count() >= MIN_PASSWORD_LENGTH
}

/// Classifies `value` for the given field under `ruleset`.
#[must_use]
pub fn classify(ruleset: Ruleset, spec: &FieldSpec, value: &str) -> Validity {
    let value = value.trim();

    match (ruleset, spec.kind) {
        (Ruleset::Login, FieldKind::Email) => from_bool(valid_email(value)),
        (Ruleset::Login, FieldKind::Password) => from_bool(valid_password(value)),
        (Ruleset::Login, FieldKind::Text) => Validity::Unvalidated,
        (Ruleset::Registration, FieldKind::Email) => {
            if value.is_empty() {
                Validity::Unvalidated
            } else {
                from_bool(valid_email(value))
            }
        }
        (Ruleset::Registration, _) if spec.required => from_bool(!value.is_empty()),
        (Ruleset::Registration, _) => Validity::Unvalidated,
    }
}

/// Whether a tag lets the form submit: required fields must be `Valid`, and
/// nothing may be `Invalid`.
#[must_use]
pub fn accepts(spec: &FieldSpec, validity: Validity) -> bool {
    match validity {
        Validity::Valid => true,
        Validity::Invalid => false,
        Validity::Unvalidated => !spec.required,
    }
}

/// Reads the field from the view, classifies it and tags it.
pub fn validate_field(view: &dyn FormView, ruleset: Ruleset, spec: FieldSpec) -> Field {
    let mut field = Field::new(spec, view.value(spec.name).unwrap_or_default());
    field.validity = classify(ruleset, &spec, &field.value);
    view.set_validity(spec.name, field.validity);
    field
}

const fn from_bool(valid: bool) -> Validity {
    if valid {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}
