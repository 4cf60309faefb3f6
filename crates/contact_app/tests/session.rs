use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use contact_app::platform::{FormSession, SubmitResult};
use contact_core::{
    default_field_specs, Msg, OutcomeKind, Presenter, SubmissionOutcome, SubmissionPhase,
    FALLBACK_CONTACT,
};
use contact_gateway::{GatewayHandle, SubmitGateway, TransportError, TransportFailureKind};
use pretty_assertions::assert_eq;

const FIXED_TIME: &str = "2026-10-17T09:30:00.000Z";
const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(form_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    FieldError(String, String),
    ClearError(String),
    Busy(bool),
    Outcome(OutcomeKind, String),
    ClearForm,
}

struct RecordingPresenter {
    calls: Vec<Call>,
    busy: Arc<AtomicBool>,
}

impl RecordingPresenter {
    fn new(busy: Arc<AtomicBool>) -> Self {
        Self {
            calls: Vec::new(),
            busy,
        }
    }
}

impl Presenter for RecordingPresenter {
    fn show_field_error(&mut self, field: &str, message: &str) {
        self.calls
            .push(Call::FieldError(field.to_string(), message.to_string()));
    }

    fn clear_field_error(&mut self, field: &str) {
        self.calls.push(Call::ClearError(field.to_string()));
    }

    fn show_busy(&mut self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
        self.calls.push(Call::Busy(busy));
    }

    fn show_outcome_message(&mut self, kind: OutcomeKind, html: &str) {
        self.calls.push(Call::Outcome(kind, html.to_string()));
    }

    fn clear_form(&mut self) {
        self.calls.push(Call::ClearForm);
    }
}

/// Records every body and whether the UI was busy while the call ran.
struct FakeGateway {
    fail: bool,
    delay: Duration,
    busy: Arc<AtomicBool>,
    calls: AtomicUsize,
    bodies: Mutex<Vec<serde_json::Value>>,
    busy_during_call: Mutex<Vec<bool>>,
}

impl FakeGateway {
    fn new(fail: bool, busy: Arc<AtomicBool>) -> Self {
        Self {
            fail,
            delay: Duration::from_millis(20),
            busy,
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
            busy_during_call: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl SubmitGateway for FakeGateway {
    async fn submit(&self, body: &serde_json::Value) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body.clone());
        self.busy_during_call
            .lock()
            .unwrap()
            .push(self.busy.load(Ordering::SeqCst));
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(TransportError::new(
                TransportFailureKind::Network,
                "simulated network failure",
            ))
        } else {
            Ok(())
        }
    }
}

struct Harness {
    session: FormSession<RecordingPresenter>,
    gateway: Arc<FakeGateway>,
}

fn harness(gateway: FakeGateway, busy: Arc<AtomicBool>, completion_wait: Duration) -> Harness {
    init_logging();
    let gateway = Arc::new(gateway);
    let handle = GatewayHandle::with_gateway(gateway.clone(), WAIT).unwrap();
    let session = FormSession::new(
        default_field_specs(),
        RecordingPresenter::new(busy),
        handle,
        completion_wait,
    )
    .with_clock(Arc::new(|| FIXED_TIME.to_string()));
    Harness { session, gateway }
}

fn ok_harness() -> Harness {
    let busy = Arc::new(AtomicBool::new(false));
    harness(FakeGateway::new(false, busy.clone()), busy, WAIT)
}

fn failing_harness() -> Harness {
    let busy = Arc::new(AtomicBool::new(false));
    harness(FakeGateway::new(true, busy.clone()), busy, WAIT)
}

fn fill_scenario(session: &mut FormSession<RecordingPresenter>) {
    for (name, value) in [
        ("name", "Al"),
        ("email", "a@b.c"),
        ("age", "20"),
        ("location", "X"),
        ("interest", "Y"),
        ("involvement", "Z"),
    ] {
        session.enter(name, value);
    }
}

#[test]
fn successful_submission_sends_once_and_clears_form() {
    let mut h = ok_harness();
    fill_scenario(&mut h.session);
    assert!(h.session.presenter().calls.is_empty());

    let result = h.session.submit();

    assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::Success));
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.gateway.bodies.lock().unwrap()[0],
        serde_json::json!({
            "timestamp": FIXED_TIME,
            "name": "Al",
            "email": "a@b.c",
            "age": "20",
            "location": "X",
            "interest": "Y",
            "involvement": "Z",
            "experience": "Not specified",
            "skills": "Not specified",
            "message": "No additional message",
            "newsletter": "No",
        })
    );
    assert!(h.session.form().is_empty());
    assert_eq!(h.session.phase(), SubmissionPhase::Idle);

    let calls = &h.session.presenter().calls;
    assert_eq!(calls.first(), Some(&Call::Busy(true)));
    assert_eq!(calls.last(), Some(&Call::Busy(false)));
    assert!(calls.contains(&Call::ClearForm));
    assert!(calls
        .iter()
        .any(|call| matches!(call, Call::Outcome(OutcomeKind::Success, _))));
}

#[test]
fn busy_state_spans_the_gateway_call_on_both_paths() {
    for mut h in [ok_harness(), failing_harness()] {
        fill_scenario(&mut h.session);
        h.session.submit();

        assert_eq!(*h.gateway.busy_during_call.lock().unwrap(), vec![true]);
        assert!(!h.session.presenter().busy.load(Ordering::SeqCst));
        let busy_calls: Vec<_> = h
            .session
            .presenter()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Busy(_)))
            .cloned()
            .collect();
        assert_eq!(busy_calls, vec![Call::Busy(true), Call::Busy(false)]);
    }
}

#[test]
fn transport_failure_keeps_values_and_shows_fallback_contact() {
    let mut h = failing_harness();
    fill_scenario(&mut h.session);

    let result = h.session.submit();

    match result {
        SubmitResult::Completed(SubmissionOutcome::Failure(failure)) => {
            assert!(failure.reason.contains("simulated network failure"));
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(h.session.form().value("name"), "Al");
    assert_eq!(h.session.form().value("email"), "a@b.c");
    assert_eq!(h.session.form().value("involvement"), "Z");

    let calls = &h.session.presenter().calls;
    assert!(!calls.contains(&Call::ClearForm));
    let shown = calls
        .iter()
        .find_map(|call| match call {
            Call::Outcome(OutcomeKind::Error, html) => Some(html.clone()),
            _ => None,
        })
        .expect("error outcome shown");
    assert!(shown.contains(FALLBACK_CONTACT));
    assert_eq!(calls.last(), Some(&Call::Busy(false)));
}

#[test]
fn invalid_email_never_reaches_gateway() {
    let mut h = ok_harness();
    fill_scenario(&mut h.session);
    h.session.enter("email", "not-an-email");

    let result = h.session.submit();

    assert_eq!(result, SubmitResult::Invalid);
    assert_eq!(h.session.phase(), SubmissionPhase::Invalid);
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0);
    assert!(!h.session.presenter().calls.contains(&Call::Busy(true)));
    assert!(h.session.presenter().calls.contains(&Call::FieldError(
        "email".into(),
        "Please enter a valid email address".into()
    )));
}

#[test]
fn queued_double_submit_sends_once() {
    let mut h = ok_harness();
    fill_scenario(&mut h.session);
    let tx = h.session.sender();
    tx.send(Msg::SubmitRequested {
        submitted_at: FIXED_TIME.to_string(),
    })
    .unwrap();

    // The queued request is only seen while the first one is in flight.
    let result = h.session.submit();

    assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::Success));
    h.session.pump();
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unanswered_submission_becomes_failure() {
    let busy = Arc::new(AtomicBool::new(false));
    let mut gateway = FakeGateway::new(false, busy.clone());
    gateway.delay = Duration::from_secs(2);
    let mut h = harness(gateway, busy, Duration::from_millis(100));
    fill_scenario(&mut h.session);

    let result = h.session.submit();

    assert!(matches!(
        result,
        SubmitResult::Completed(SubmissionOutcome::Failure(_))
    ));
    assert_eq!(h.session.form().value("name"), "Al");
    assert!(!h.session.presenter().busy.load(Ordering::SeqCst));
}

#[test]
fn blur_reports_errors_and_input_clears_them() {
    let mut h = ok_harness();
    h.session.enter("name", "A");
    h.session.enter("name", "Al");

    assert_eq!(
        h.session.presenter().calls,
        vec![
            Call::FieldError(
                "name".into(),
                "Name must be at least 2 characters long".into()
            ),
            Call::ClearError("name".into()),
        ]
    );
}

#[test]
fn view_follows_invalid_attempt() {
    let mut h = ok_harness();
    fill_scenario(&mut h.session);
    assert_eq!(h.session.view().phase, SubmissionPhase::Idle);
    assert_eq!(h.session.view().fields[1].value, "a@b.c");

    h.session.enter("email", "not-an-email");
    h.session.submit();

    let view = h.session.view();
    assert_eq!(view.phase, SubmissionPhase::Invalid);
    assert!(!view.busy);
    let email = view
        .fields
        .iter()
        .find(|row| row.name == "email")
        .expect("email row");
    assert_eq!(email.value, "not-an-email");
    assert_eq!(
        email.error.as_deref(),
        Some("Please enter a valid email address")
    );
}

#[test]
fn steady_traffic_does_not_extend_completion_wait() {
    let busy = Arc::new(AtomicBool::new(false));
    let mut gateway = FakeGateway::new(false, busy.clone());
    gateway.delay = Duration::from_secs(1);
    let mut h = harness(gateway, busy, Duration::from_millis(100));
    fill_scenario(&mut h.session);

    let tx = h.session.sender();
    let stop = Arc::new(AtomicBool::new(false));
    let ticker = {
        let stop = stop.clone();
        std::thread::spawn(move || {
            while !stop.load(Ordering::SeqCst) {
                if tx.send(Msg::NoOp).is_err() {
                    break;
                }
                std::thread::sleep(Duration::from_millis(10));
            }
        })
    };

    let started = std::time::Instant::now();
    let result = h.session.submit();
    stop.store(true, Ordering::SeqCst);
    ticker.join().unwrap();

    assert!(matches!(
        result,
        SubmitResult::Completed(SubmissionOutcome::Failure(_))
    ));
    assert!(started.elapsed() < Duration::from_millis(900));
    assert!(!h.session.presenter().busy.load(Ordering::SeqCst));
}
