use serde::Serialize;

use crate::FormState;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_ADDITIONAL_MESSAGE: &str = "No additional message";

/// The row sent to the spreadsheet endpoint for one submission attempt.
///
/// Built once, after validation passed, and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    timestamp: String,
    name: String,
    email: String,
    age: String,
    location: String,
    interest: String,
    involvement: String,
    experience: String,
    skills: String,
    message: String,
    newsletter: String,
}

impl SubmissionPayload {
    pub(crate) fn from_form(form: &FormState, timestamp: impl Into<String>) -> Self {
        let copy = |name: &str| form.value(name).to_string();
        let or_default = |name: &str, default: &str| {
            let value = form.value(name);
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            timestamp: timestamp.into(),
            name: copy("name"),
            email: copy("email"),
            age: copy("age"),
            location: copy("location"),
            interest: copy("interest"),
            involvement: copy("involvement"),
            experience: or_default("experience", NOT_SPECIFIED),
            skills: or_default("skills", NOT_SPECIFIED),
            message: or_default("message", NO_ADDITIONAL_MESSAGE),
            newsletter: newsletter_flag(form.value("newsletter")).to_string(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "timestamp" => &self.timestamp,
            "name" => &self.name,
            "email" => &self.email,
            "age" => &self.age,
            "location" => &self.location,
            "interest" => &self.interest,
            "involvement" => &self.involvement,
            "experience" => &self.experience,
            "skills" => &self.skills,
            "message" => &self.message,
            "newsletter" => &self.newsletter,
            _ => return None,
        };
        Some(value)
    }
}

/// Checkbox state as the sheet expects it.
fn newsletter_flag(raw: &str) -> &'static str {
    let raw = raw.trim();
    if ["on", "yes", "true"]
        .iter()
        .any(|accepted| raw.eq_ignore_ascii_case(accepted))
    {
        "Yes"
    } else {
        "No"
    }
}
