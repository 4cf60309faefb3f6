use crate::view_model::{FieldRowView, FormViewModel};
use crate::{FieldSpec, FormState, SubmissionOutcome};

pub type SubmissionId = u64;

/// Lifecycle of one submission attempt.
///
/// `Validating`, `Succeeded` and `Failed` only exist inside a single
/// `update` call; a state handed back to the caller rests in `Idle`,
/// `Invalid` or `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    phase: SubmissionPhase,
    in_flight: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    last_outcome: Option<SubmissionOutcome>,
    busy: bool,
    dirty: bool,
}

impl AppState {
    pub fn new(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            form: FormState::new(specs),
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view(&self) -> FormViewModel {
        FormViewModel {
            phase: self.phase,
            busy: self.busy,
            fields: self
                .form
                .fields()
                .iter()
                .map(|field| FieldRowView {
                    name: field.name().to_string(),
                    label: field.display_label(),
                    value: field.value().to_string(),
                    error: field.error().map(|err| err.message.clone()),
                })
                .collect(),
            last_outcome: self.last_outcome.as_ref().map(SubmissionOutcome::kind),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.dirty = true;
        &mut self.form
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        if self.phase != phase {
            form_logging::form_debug!("submission phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.next_submission_id += 1;
        let id = self.next_submission_id;
        self.in_flight = Some(id);
        self.busy = true;
        self.dirty = true;
        id
    }

    pub(crate) fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        self.in_flight = None;
        self.busy = false;
        self.last_outcome = Some(outcome);
        self.dirty = true;
    }
}
