use form_logging::{form_debug, form_info, form_warn};

use crate::{
    validate_field, validate_form, AppState, Effect, FieldError, FormField, Msg, SubmissionId,
    SubmissionOutcome, SubmissionPayload, SubmissionPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { name, value } => match state.form_mut().field_mut(&name) {
            Some(field) => {
                field.set_value(value);
                if field.error().is_some() {
                    field.set_error(None);
                    vec![Effect::ClearFieldError { field: name }]
                } else {
                    Vec::new()
                }
            }
            None => {
                form_warn!("Ignoring input for unknown field {}", name);
                Vec::new()
            }
        },
        Msg::FieldBlurred { name } => match state.form_mut().field_mut(&name) {
            Some(field) => {
                let error = validate_field(field).err();
                let mut effects = Vec::new();
                record_result(field, error, &mut effects);
                effects
            }
            None => {
                form_warn!("Ignoring blur for unknown field {}", name);
                Vec::new()
            }
        },
        Msg::SubmitRequested { submitted_at } => {
            if let Some(id) = state.in_flight() {
                form_warn!("Submit ignored: submission {} still in flight", id);
                return (state, Vec::new());
            }
            submit(&mut state, submitted_at)
        }
        Msg::SubmissionCompleted { id, result } => {
            if state.in_flight() != Some(id) {
                form_warn!(
                    "Ignoring completion for submission {} (in flight: {:?})",
                    id,
                    state.in_flight()
                );
                return (state, Vec::new());
            }
            let outcome = match result {
                Ok(()) => SubmissionOutcome::Success,
                Err(failure) => SubmissionOutcome::Failure(failure),
            };
            complete(&mut state, id, outcome)
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, submitted_at: String) -> Vec<Effect> {
    state.set_phase(SubmissionPhase::Validating);

    let mut effects = Vec::new();
    let errors = validate_form(state.form()).err().unwrap_or_default();
    for field in state.form_mut().fields_mut().filter(|f| f.is_required()) {
        let error = errors.iter().find(|err| err.field == field.name()).cloned();
        record_result(field, error, &mut effects);
    }

    if !errors.is_empty() {
        form_info!("Submit blocked: {} invalid field(s)", errors.len());
        state.set_phase(SubmissionPhase::Invalid);
        return effects;
    }

    let payload = SubmissionPayload::from_form(state.form(), submitted_at);
    let id = state.begin_submission();
    state.set_phase(SubmissionPhase::Submitting);
    form_info!("Submission {} dispatched at {}", id, payload.timestamp());

    effects.push(Effect::ShowBusy(true));
    effects.push(Effect::Submit { id, payload });
    effects
}

fn complete(state: &mut AppState, id: SubmissionId, outcome: SubmissionOutcome) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(3);
    match &outcome {
        SubmissionOutcome::Success => {
            state.set_phase(SubmissionPhase::Succeeded);
            form_info!("Submission {} dispatched without transport error", id);
            state.form_mut().clear();
            effects.push(Effect::ClearForm);
        }
        SubmissionOutcome::Failure(failure) => {
            state.set_phase(SubmissionPhase::Failed);
            form_warn!("Submission {} failed: {}", id, failure.reason);
        }
    }
    effects.push(Effect::ShowOutcome {
        kind: outcome.kind(),
        html: outcome.message_html(),
    });
    effects.push(Effect::ShowBusy(false));

    state.finish_submission(outcome);
    state.set_phase(SubmissionPhase::Idle);
    effects
}

/// Stores a validation result on the field and emits the matching
/// presentation effect. Passing fields only emit a clear when an error was
/// actually displayed.
fn record_result(
    field: &mut FormField,
    error: Option<FieldError>,
    effects: &mut Vec<Effect>,
) {
    match error {
        Some(error) => {
            form_debug!("Field {} invalid: {}", error.field, error.message);
            effects.push(Effect::ShowFieldError {
                field: error.field.clone(),
                message: error.message.clone(),
            });
            field.set_error(Some(error));
        }
        None if field.error().is_some() => {
            field.set_error(None);
            effects.push(Effect::ClearFieldError {
                field: field.name().to_string(),
            });
        }
        None => {}
    }
}
