use crate::{SubmissionId, TransportFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User typed into a field.
    FieldChanged { name: String, value: String },
    /// User left a field; validate it on its own.
    FieldBlurred { name: String },
    /// User submitted the form. `submitted_at` becomes the payload timestamp.
    SubmitRequested { submitted_at: String },
    /// Gateway finished the call for submission `id`.
    SubmissionCompleted {
        id: SubmissionId,
        result: Result<(), TransportFailure>,
    },
    /// Leaves state untouched.
    NoOp,
}
