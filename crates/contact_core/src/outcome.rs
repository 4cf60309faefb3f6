/// Address offered to the user when a submission could not be dispatched.
pub const FALLBACK_CONTACT: &str = "hello@youthforearth.org";

/// Result of one submission attempt, consumed once by the controller.
///
/// `Success` only means the request was dispatched: the endpoint's response
/// is opaque, so a rejection on the spreadsheet side is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(TransportFailure),
}

/// Why the gateway call did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Error,
}

impl SubmissionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SubmissionOutcome::Success => OutcomeKind::Success,
            SubmissionOutcome::Failure(_) => OutcomeKind::Error,
        }
    }

    /// Fixed copy shown to the user for this outcome.
    pub fn message_html(&self) -> String {
        match self {
            SubmissionOutcome::Success => success_message_html(),
            SubmissionOutcome::Failure(_) => failure_message_html(),
        }
    }
}

pub fn success_message_html() -> String {
    concat!(
        "<div class=\"message success\">",
        "<h3>Welcome to Youth For Earth!</h3>",
        "<p>Thank you for joining our movement! We've received your information ",
        "and will be in touch soon with ways to get involved.</p>",
        "<p>In the meantime, check out our <a href=\"facts.html\">Global Facts</a> ",
        "page to learn more about climate change.</p>",
        "</div>"
    )
    .to_string()
}

pub fn failure_message_html() -> String {
    format!(
        "<div class=\"message error\">\
         <h3>Submission Failed</h3>\
         <p>We're sorry, but there was an error submitting your form. \
         Please try again or contact us directly at {FALLBACK_CONTACT}</p>\
         </div>"
    )
}
