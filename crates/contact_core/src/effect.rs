use crate::{OutcomeKind, SubmissionId, SubmissionPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowFieldError { field: String, message: String },
    ClearFieldError { field: String },
    ShowBusy(bool),
    Submit {
        id: SubmissionId,
        payload: SubmissionPayload,
    },
    ShowOutcome { kind: OutcomeKind, html: String },
    ClearForm,
}
