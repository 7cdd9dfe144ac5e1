//! Respond/focus actions against agent sessions.
//!
//! Success is determined by the structured `success` marker in the decoded
//! JSON body, not by the HTTP status alone; anything else classifies by the
//! `error_type` discriminator into a distinct user-facing message. Failures
//! resolve to an [`ActionOutcome`], never a panic or an escaping error.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::pending::PendingDraftStore;
use crate::retry::{StatusSink, TracingSink, is_retryable_status, send_with_retry};
use crate::transport::{ApiRequest, HttpTransport};

/// Classified application errors from the respond/focus endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The agent changed state concurrently; the action no longer applies.
    WrongState,
    /// The agent control socket does not exist.
    SocketMissing,
    /// The agent control socket refused the connection.
    ConnectionRefused,
    /// The remote agent process is dead.
    ProcessDead,
    /// The request lacked the agent identifier.
    MissingIdentifier,
    /// Transient failure that survived all retries.
    Exhausted,
    /// Anything the backend did not classify.
    Unclassified,
}

impl ApiErrorKind {
    /// Maps the backend's `error_type` discriminator to a kind.
    pub fn from_wire(error_type: Option<&str>) -> Self {
        match error_type {
            Some("wrong_state") => Self::WrongState,
            Some("socket_missing") => Self::SocketMissing,
            Some("connection_refused") => Self::ConnectionRefused,
            Some("process_dead") => Self::ProcessDead,
            Some("missing_identifier") => Self::MissingIdentifier,
            _ => Self::Unclassified,
        }
    }

    /// Distinct user-facing message for this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WrongState => {
                "The agent changed state before the action arrived. Refresh and try again."
            }
            Self::SocketMissing => "The agent control socket is missing. The session may have ended.",
            Self::ConnectionRefused => "The agent control socket refused the connection.",
            Self::ProcessDead => "The agent process is no longer running.",
            Self::MissingIdentifier => "The request was missing the agent identifier.",
            Self::Exhausted => "The server is unavailable. Gave up after retrying.",
            Self::Unclassified => "The action failed for an unknown reason.",
        }
    }
}

/// Terminal outcome of a respond/focus action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Success,
    Failed {
        kind: ApiErrorKind,
        message: String,
    },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    fn failed(kind: ApiErrorKind) -> Self {
        Self::Failed {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}

/// Body shape shared by the respond and focus endpoints.
#[derive(Debug, Default, Deserialize)]
struct ActionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
}

/// Client for state-changing agent actions, wired through the retry layer.
pub struct AgentActionClient<T: HttpTransport> {
    transport: T,
    retry: RetryConfig,
    sink: Box<dyn StatusSink>,
    pending: PendingDraftStore,
}

impl<T: HttpTransport> AgentActionClient<T> {
    pub fn new(transport: T, retry: RetryConfig, pending: PendingDraftStore) -> Self {
        Self {
            transport,
            retry,
            sink: Box::new(TracingSink),
            pending,
        }
    }

    /// Replaces the default tracing sink with a custom one.
    pub fn with_status_sink(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Forwards `text` to the agent's control socket.
    ///
    /// On failure the attempted text is stashed in the pending-draft store
    /// keyed by agent id so the operator can recover it.
    pub async fn respond(&self, agent_id: &str, text: &str) -> ActionOutcome {
        let request = ApiRequest::post(
            format!("/api/agents/{agent_id}/respond"),
            json!({ "text": text }),
        );
        let outcome = self.send_action(agent_id, &request).await;

        if !outcome.is_success() {
            if let Err(err) = self.pending.stash(agent_id, text).await {
                warn!(agent_id, %err, "failed to stash pending draft");
            }
        }
        outcome
    }

    /// Requests focus for the agent's session.
    pub async fn focus(&self, agent_id: &str) -> ActionOutcome {
        let request = ApiRequest::post(format!("/api/agents/{agent_id}/focus"), json!({}));
        self.send_action(agent_id, &request).await
    }

    async fn send_action(&self, agent_id: &str, request: &ApiRequest) -> ActionOutcome {
        let response =
            match send_with_retry(&self.transport, request, &self.retry, self.sink.as_ref()).await
            {
                Ok(response) => response,
                Err(err) => {
                    debug!(agent_id, %err, "transport failure after retries");
                    return ActionOutcome::failed(ApiErrorKind::Exhausted);
                }
            };

        // A still-retryable status here means the retry budget ran out.
        if is_retryable_status(response.status) {
            return ActionOutcome::failed(ApiErrorKind::Exhausted);
        }

        let parsed: ActionResponse = serde_json::from_str(&response.body).unwrap_or_default();
        if parsed.success {
            self.sink.acknowledged(agent_id);
            return ActionOutcome::Success;
        }

        let kind = ApiErrorKind::from_wire(parsed.error_type.as_deref());
        if let Some(detail) = parsed.error {
            debug!(agent_id, status = response.status, %detail, "action error detail");
        }
        let outcome = ActionOutcome::failed(kind);
        if let ActionOutcome::Failed { message, .. } = &outcome {
            self.sink.failed(message);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_mapping() {
        assert_eq!(
            ApiErrorKind::from_wire(Some("wrong_state")),
            ApiErrorKind::WrongState
        );
        assert_eq!(
            ApiErrorKind::from_wire(Some("socket_missing")),
            ApiErrorKind::SocketMissing
        );
        assert_eq!(
            ApiErrorKind::from_wire(Some("connection_refused")),
            ApiErrorKind::ConnectionRefused
        );
        assert_eq!(
            ApiErrorKind::from_wire(Some("process_dead")),
            ApiErrorKind::ProcessDead
        );
        assert_eq!(
            ApiErrorKind::from_wire(Some("missing_identifier")),
            ApiErrorKind::MissingIdentifier
        );
        assert_eq!(
            ApiErrorKind::from_wire(Some("something_else")),
            ApiErrorKind::Unclassified
        );
        assert_eq!(ApiErrorKind::from_wire(None), ApiErrorKind::Unclassified);
    }

    #[test]
    fn test_messages_are_distinct() {
        let kinds = [
            ApiErrorKind::WrongState,
            ApiErrorKind::SocketMissing,
            ApiErrorKind::ConnectionRefused,
            ApiErrorKind::ProcessDead,
            ApiErrorKind::MissingIdentifier,
            ApiErrorKind::Exhausted,
            ApiErrorKind::Unclassified,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.user_message(), b.user_message());
            }
        }
    }

    #[test]
    fn test_unparseable_body_is_unclassified_failure() {
        let parsed: ActionResponse = serde_json::from_str("not json").unwrap_or_default();
        assert!(!parsed.success);
        assert_eq!(
            ApiErrorKind::from_wire(parsed.error_type.as_deref()),
            ApiErrorKind::Unclassified
        );
    }
}
