use crate::FieldError;

/// Static description of a form field, as provided by the page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    /// Visible label text, possibly decorated with a `*` required marker.
    pub label: Option<String>,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            required: false,
        }
    }
}

/// Which extra rule applies to a field, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Email,
    PersonName,
    Other,
}

impl FieldRole {
    pub fn for_name(name: &str) -> Self {
        match name {
            "email" => FieldRole::Email,
            "name" => FieldRole::PersonName,
            _ => FieldRole::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    spec: FieldSpec,
    value: String,
    error: Option<FieldError>,
}

impl FormField {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
            error: None,
        }
    }

    pub fn with_value(spec: FieldSpec, value: impl Into<String>) -> Self {
        Self {
            spec,
            value: value.into(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    pub fn role(&self) -> FieldRole {
        FieldRole::for_name(&self.spec.name)
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Label used in error messages: the display text without the `*`
    /// marker, or the raw field name when there is no usable label.
    pub fn display_label(&self) -> String {
        self.spec
            .label
            .as_deref()
            .map(|label| label.replace('*', "").trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.spec.name.clone())
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn set_error(&mut self, error: Option<FieldError>) {
        self.error = error;
    }
}

/// The ordered set of fields making up one form instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    fields: Vec<FormField>,
}

impl FormState {
    pub fn new(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            fields: specs.into_iter().map(FormField::new).collect(),
        }
    }

    pub fn from_fields(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.fields.iter_mut()
    }

    /// Current value of `name`, or `""` when the form has no such field.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(FormField::value).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|field| field.value().is_empty())
    }

    /// Resets every value to empty and drops all errors.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
    }
}

/// The fields of the "join the movement" form.
pub fn default_field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required("name", "Full Name *"),
        FieldSpec::required("email", "Email Address *"),
        FieldSpec::required("age", "Age *"),
        FieldSpec::required("location", "Location *"),
        FieldSpec::required("interest", "Primary Interest *"),
        FieldSpec::required("involvement", "How would you like to get involved? *"),
        FieldSpec::optional("experience", "Previous Experience"),
        FieldSpec::optional("skills", "Skills & Talents"),
        FieldSpec::optional("message", "Additional Message"),
        FieldSpec::optional("newsletter", "Subscribe to our newsletter"),
    ]
}
