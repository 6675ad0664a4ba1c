use std::fmt;

/// Input type of a field, as declared by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Password,
    Text,
}

/// Styling tag carried by a field after validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

impl Validity {
    /// CSS-style class name, `None` when no tag applies.
    #[must_use]
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Validity::Unvalidated => None,
            Validity::Valid => Some("valid"),
            Validity::Invalid => Some("invalid"),
        }
    }
}

/// Static description of one form input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A field read from the view: its spec, current value and tag.
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    pub spec: FieldSpec,
    pub value: String,
    pub validity: Validity,
}

impl Field {
    #[must_use]
    pub fn new(spec: FieldSpec, value: impl Into<String>) -> Self {
        Self {
            spec,
            value: value.into(),
            validity: Validity::Unvalidated,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.spec.name
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.spec.kind == FieldKind::Password {
            "[redacted]"
        } else {
            self.value.as_str()
        };

        f.debug_struct("Field")
            .field("name", &self.spec.name)
            .field("kind", &self.spec.kind)
            .field("value", &value)
            .field("validity", &self.validity)
            .finish()
    }
}
