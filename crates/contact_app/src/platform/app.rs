use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use contact_core::{
    update, AppState, FieldSpec, FormState, FormViewModel, Msg, Presenter, SubmissionOutcome,
    SubmissionPhase, TransportFailure,
};
use contact_gateway::GatewayHandle;
use form_logging::{form_debug, form_info, form_warn};

use super::config::{AppConfig, Cli, DEFAULT_CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::persistence::{Draft, DraftStore};
use super::ui::TerminalPresenter;
use super::AppError;

/// Produces the timestamp stamped on each submission.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-17T09:30:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Validation failed; nothing was sent.
    Invalid,
    /// Another submission was still in flight; this request was dropped.
    Ignored,
    Completed(SubmissionOutcome),
}

/// One form instance: owns the state, runs the message loop and feeds
/// effects to the presenter and the gateway worker.
pub struct FormSession<P: Presenter> {
    state: AppState,
    view: FormViewModel,
    presenter: P,
    runner: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    clock: Clock,
    completion_wait: Duration,
}

impl<P: Presenter> FormSession<P> {
    pub fn new(
        specs: Vec<FieldSpec>,
        presenter: P,
        gateway: (GatewayHandle, contact_gateway::GatewayEvents),
        completion_wait: Duration,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (handle, events) = gateway;
        let runner = EffectRunner::new(handle, events, msg_tx.clone());
        let state = AppState::new(specs);
        Self {
            view: state.view(),
            state,
            presenter,
            runner,
            msg_tx,
            msg_rx,
            clock: Arc::new(iso_timestamp),
            completion_wait,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn form(&self) -> &FormState {
        self.state.form()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state.phase()
    }

    /// Latest rendered snapshot of the form.
    pub fn view(&self) -> &FormViewModel {
        &self.view
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Queue a message for the next `pump`/`submit` pass.
    pub fn sender(&self) -> mpsc::Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if self.state.consume_dirty() {
            self.view = self.state.view();
            form_debug!("view refreshed, phase={:?}", self.view.phase);
        }
        self.runner.run(effects, &mut self.presenter);
    }

    /// Types `value` into `name` and leaves the field, as a user would.
    pub fn enter(&mut self, name: &str, value: &str) {
        self.dispatch(Msg::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
        self.dispatch(Msg::FieldBlurred {
            name: name.to_string(),
        });
    }

    /// Handles every message already queued without blocking.
    pub fn pump(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    /// Submits the form and blocks until the attempt is resolved.
    pub fn submit(&mut self) -> SubmitResult {
        if let Some(id) = self.state.in_flight() {
            form_warn!("Submit requested while submission {} is in flight", id);
            return SubmitResult::Ignored;
        }

        self.dispatch(Msg::SubmitRequested {
            submitted_at: (self.clock)(),
        });
        let Some(id) = self.state.in_flight() else {
            return SubmitResult::Invalid;
        };

        let deadline = Instant::now() + self.completion_wait;
        while self.state.in_flight() == Some(id) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let next = if remaining.is_zero() {
                None
            } else {
                self.msg_rx.recv_timeout(remaining).ok()
            };
            match next {
                Some(msg) => self.dispatch(msg),
                None => {
                    form_warn!("No completion for submission {} in time", id);
                    self.dispatch(Msg::SubmissionCompleted {
                        id,
                        result: Err(TransportFailure::new("submission worker did not answer")),
                    });
                }
            }
        }

        match self.state.last_outcome() {
            Some(outcome) => SubmitResult::Completed(outcome.clone()),
            None => SubmitResult::Invalid,
        }
    }
}

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let mut config = AppConfig::load(&config_path)?;
    config.apply_cli(&cli);

    form_logging::initialize(cli.log.into(), cli.log_level(), &config.log_path);
    form_info!("Using endpoint {}", config.endpoint);

    let drafts = DraftStore::new(&config.draft_path);
    let mut draft = drafts.load()?;
    draft.values.extend(cli.assignments.iter().cloned());

    let settings = config.gateway_settings();
    let completion_wait = settings.submit_timeout + Duration::from_secs(5);
    let gateway = GatewayHandle::new(settings).map_err(AppError::from)?;
    let presenter = TerminalPresenter::new(std::io::stdout());
    let mut session = FormSession::new(config.field_specs(), presenter, gateway, completion_wait);

    for (name, value) in &draft.values {
        session.enter(name, value);
    }

    let exit = match session.submit() {
        SubmitResult::Completed(SubmissionOutcome::Success) => {
            drafts.clear();
            ExitCode::SUCCESS
        }
        SubmitResult::Completed(SubmissionOutcome::Failure(_))
        | SubmitResult::Invalid
        | SubmitResult::Ignored => {
            let view = session.view().clone();
            session.presenter_mut().render_summary(&view);
            drafts.save(&Draft::from_form(session.form()))?;
            ExitCode::FAILURE
        }
    };
    Ok(exit)
}
