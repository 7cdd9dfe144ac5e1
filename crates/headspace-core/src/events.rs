//! Registration contract for the dashboard's server-sent event stream.
//!
//! The stream transport itself is an external collaborator; this module only
//! types the event kinds and the `on(kind, handler)` registration surface so
//! consumers can subscribe without knowing the transport.

use serde::{Deserialize, Serialize};

/// Event kinds emitted on the dashboard stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentEventKind {
    /// An agent's state changed and its panel should refresh.
    StateUpdate,
    /// Aggregated frustration crossed a severity threshold.
    FrustrationAlert,
}

impl AgentEventKind {
    /// Wire name used by the backend stream.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AgentEventKind::StateUpdate => "state_update",
            AgentEventKind::FrustrationAlert => "frustration_alert",
        }
    }
}

/// Handler invoked with the raw event payload.
pub type EventHandler = Box<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Registration surface exposed by the externally supplied stream client.
pub trait EventSubscriber {
    /// Registers `handler` for events of `kind`.
    fn on(&mut self, kind: AgentEventKind, handler: EventHandler);
}
