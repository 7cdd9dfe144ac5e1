//! HTTP client layer for the Claude Headspace backend.
//!
//! Wraps the backend REST API behind a transport seam, adds bounded
//! retry-with-backoff for transient failures, classifies application errors
//! into user-facing messages and keeps unsent respond drafts recoverable.

pub mod actions;
pub mod config;
pub mod paths;
pub mod pending;
pub mod retry;
pub mod transport;

pub use actions::{ActionOutcome, AgentActionClient, ApiErrorKind};
pub use config::{ClientConfig, ConfigService, RetryConfig};
pub use pending::PendingDraftStore;
pub use retry::{StatusSink, TracingSink, send_with_retry};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, TransportError};
