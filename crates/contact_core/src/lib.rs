//! Contact form core: field validation and the pure submission state machine.
mod effect;
mod field;
mod msg;
mod outcome;
mod payload;
mod presenter;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use field::{default_field_specs, FieldRole, FieldSpec, FormField, FormState};
pub use msg::Msg;
pub use outcome::{
    failure_message_html, success_message_html, OutcomeKind, SubmissionOutcome, TransportFailure,
    FALLBACK_CONTACT,
};
pub use payload::{SubmissionPayload, NOT_SPECIFIED, NO_ADDITIONAL_MESSAGE};
pub use presenter::Presenter;
pub use state::{AppState, SubmissionId, SubmissionPhase};
pub use update::update;
pub use validate::{
    is_valid_email, validate_field, validate_form, FieldError, FieldErrorKind, MIN_NAME_CHARS,
};
pub use view_model::{FieldRowView, FormViewModel};
