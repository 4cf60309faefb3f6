use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use form_logging::{form_info, form_warn};

use crate::gateway::{GatewaySettings, ReqwestGateway, SubmitGateway};
use crate::{GatewayEvent, SubmissionId, TransportError, TransportFailureKind};

enum GatewayCommand {
    Submit {
        id: SubmissionId,
        body: serde_json::Value,
    },
}

/// Sending side of the background gateway worker.
///
/// `submit` never blocks; each completion arrives later on the paired
/// [`GatewayEvents`].
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
}

/// Receiving side for gateway completions.
pub struct GatewayEvents {
    event_rx: mpsc::Receiver<GatewayEvent>,
}

impl GatewayHandle {
    pub fn new(settings: GatewaySettings) -> io::Result<(Self, GatewayEvents)> {
        let submit_timeout = settings.submit_timeout;
        Self::with_gateway(Arc::new(ReqwestGateway::new(settings)), submit_timeout)
    }

    pub fn with_gateway(
        gateway: Arc<dyn SubmitGateway>,
        submit_timeout: Duration,
    ) -> io::Result<(Self, GatewayEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, submit_timeout, event_tx).await;
                });
            }
        });

        Ok((Self { cmd_tx }, GatewayEvents { event_rx }))
    }

    pub fn submit(&self, id: SubmissionId, body: serde_json::Value) {
        if self
            .cmd_tx
            .send(GatewayCommand::Submit { id, body })
            .is_err()
        {
            form_warn!("Gateway worker gone; submission {} dropped", id);
        }
    }
}

impl GatewayEvents {
    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next completion, or `None` once the worker is gone.
    pub fn recv(&self) -> Option<GatewayEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<GatewayEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    gateway: &dyn SubmitGateway,
    command: GatewayCommand,
    submit_timeout: Duration,
    event_tx: mpsc::Sender<GatewayEvent>,
) {
    match command {
        GatewayCommand::Submit { id, body } => {
            let result = match tokio::time::timeout(submit_timeout, gateway.submit(&body)).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::new(
                    TransportFailureKind::Timeout,
                    format!("no answer within {submit_timeout:?}"),
                )),
            };
            form_info!("Submission {} completed: ok={}", id, result.is_ok());
            let _ = event_tx.send(GatewayEvent::SubmissionCompleted { id, result });
        }
    }
}
