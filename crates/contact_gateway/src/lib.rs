//! Contact gateway: opaque submission transport and its background worker.
mod engine;
mod gateway;
mod types;

pub use engine::{GatewayEvents, GatewayHandle};
pub use gateway::{GatewaySettings, ReqwestGateway, SubmitGateway, DEFAULT_ENDPOINT};
pub use types::{GatewayEvent, SubmissionId, TransportError, TransportFailureKind};
