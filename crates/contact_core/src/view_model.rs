use crate::{OutcomeKind, SubmissionPhase};

/// Snapshot of the form for rendering; rebuilt only when state changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormViewModel {
    pub phase: SubmissionPhase,
    pub busy: bool,
    pub fields: Vec<FieldRowView>,
    pub last_outcome: Option<OutcomeKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRowView {
    pub name: String,
    pub label: String,
    pub value: String,
    pub error: Option<String>,
}
