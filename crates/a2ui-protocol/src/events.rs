//! Store-originated events delivered to stream subscribers.

use serde::{Deserialize, Serialize};

use crate::types::{now_millis, ActionEvent, Activity, ComponentState};

/// Full activity list carried by every `activity.update` event, so a
/// subscriber that misses intermediate events still converges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub activities: Vec<Activity>,
    pub timestamp: u64,
}

/// Event payload, tagged the way the browser client expects:
/// `{"type": "component.render", "data": {…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    /// First creation of a component.
    #[serde(rename = "component.render")]
    ComponentRender(ComponentState),
    /// Re-render or partial update of an existing component.
    #[serde(rename = "component.update")]
    ComponentUpdate(ComponentState),
    /// Removal; carries the ID only.
    #[serde(rename = "component.remove")]
    ComponentRemove {
        #[serde(rename = "componentId")]
        component_id: String,
    },
    /// A user action entered the queue.
    #[serde(rename = "action.received")]
    ActionReceived(ActionEvent),
    /// The activity list changed; carries the whole sorted list.
    #[serde(rename = "activity.update")]
    ActivityUpdate(ActivitySnapshot),
    /// Keep-alive frame.
    #[serde(rename = "heartbeat")]
    Heartbeat,
}

/// An emitted event plus its emission timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEvent {
    #[serde(flatten)]
    pub payload: EventPayload,
    pub timestamp: u64,
}

impl StoreEvent {
    /// Wrap a payload, stamped now.
    pub fn now(payload: EventPayload) -> Self {
        Self {
            payload,
            timestamp: now_millis(),
        }
    }

    /// A keep-alive frame, stamped now.
    pub fn heartbeat() -> Self {
        Self::now(EventPayload::Heartbeat)
    }
}
