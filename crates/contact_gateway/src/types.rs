use std::fmt;

pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    SubmissionCompleted {
        id: SubmissionId,
        result: Result<(), TransportError>,
    },
}

/// The only failure a submission can report: the request never made it out
/// (or no answer arrived in time). Server-side rejections are not observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailureKind {
    InvalidEndpoint,
    Serialization,
    Timeout,
    Network,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            TransportFailureKind::Serialization => write!(f, "serialization error"),
            TransportFailureKind::Timeout => write!(f, "timeout"),
            TransportFailureKind::Network => write!(f, "network error"),
        }
    }
}
