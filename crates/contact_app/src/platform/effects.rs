use std::sync::mpsc;
use std::thread;

use contact_core::{Effect, Msg, Presenter, TransportFailure};
use contact_gateway::{GatewayEvent, GatewayEvents, GatewayHandle};
use form_logging::{form_error, form_info, form_warn};

/// Executes controller effects: presentation goes to the presenter,
/// submissions go to the gateway worker.
pub struct EffectRunner {
    gateway: GatewayHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(gateway: GatewayHandle, events: GatewayEvents, msg_tx: mpsc::Sender<Msg>) -> Self {
        spawn_event_loop(events, msg_tx.clone());
        Self { gateway, msg_tx }
    }

    pub fn run(&self, effects: Vec<Effect>, presenter: &mut dyn Presenter) {
        for effect in effects {
            match effect {
                Effect::ShowFieldError { field, message } => {
                    presenter.show_field_error(&field, &message);
                }
                Effect::ClearFieldError { field } => presenter.clear_field_error(&field),
                Effect::ShowBusy(busy) => presenter.show_busy(busy),
                Effect::ShowOutcome { kind, html } => presenter.show_outcome_message(kind, &html),
                Effect::ClearForm => presenter.clear_form(),
                Effect::Submit { id, payload } => match serde_json::to_value(&payload) {
                    Ok(body) => {
                        form_info!("Submit id={} timestamp={}", id, payload.timestamp());
                        self.gateway.submit(id, body);
                    }
                    Err(err) => {
                        form_error!("Failed to serialize submission {}: {}", id, err);
                        let _ = self.msg_tx.send(Msg::SubmissionCompleted {
                            id,
                            result: Err(TransportFailure::new(err.to_string())),
                        });
                    }
                },
            }
        }
    }
}

fn spawn_event_loop(events: GatewayEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            match event {
                GatewayEvent::SubmissionCompleted { id, result } => {
                    let result = result.map_err(|err| {
                        form_warn!("Submission {} failed: {}", id, err);
                        TransportFailure::new(err.to_string())
                    });
                    if msg_tx
                        .send(Msg::SubmissionCompleted { id, result })
                        .is_err()
                    {
                        break;
                    }
                }
            }
        }
    });
}
