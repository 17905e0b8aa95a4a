//! The component store: single source of truth for renderable UI state, the
//! inbound action queue, the activity log, and the sub-agent registry.
//!
//! One instance per process, constructed at startup and shared by handle.
//! Every mutation emits its change event while the write guard is held, so
//! emission order always matches mutation order.

use std::collections::VecDeque;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use a2ui_protocol::{
    component_id, now_millis, ActionEvent, Activity, ActivityPatch, ActivitySnapshot,
    ComponentKind, ComponentProps, ComponentState, EventPayload, Location, RenderRequest,
    StoreEvent, SubAgent, SubAgentPatch,
};

use crate::fanout::EventFanout;

/// Live-component ceiling; oldest-by-timestamp components are evicted above it.
pub const MAX_COMPONENTS: usize = 100;
/// Action queue ceiling; oldest entries are dropped above it.
pub const MAX_ACTIONS: usize = 50;
/// Activity list ceiling; oldest entries are dropped above it.
pub const MAX_ACTIVITIES: usize = 100;
/// Default component lifetime when a render carries no TTL: 30 minutes.
pub const DEFAULT_TTL_MS: u64 = 30 * 60 * 1000;

/// Errors the store can report. Absence is not an error; it surfaces as
/// `Option::None` or `false` from the operation concerned.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A props patch produced a value that no longer fits the component's
    /// typed variant.
    #[error("props patch does not fit {kind} props: {message}")]
    InvalidPatch {
        kind: ComponentKind,
        message: String,
    },
}

/// Diagnostic counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    #[serde(rename = "componentCount")]
    pub component_count: usize,
    #[serde(rename = "actionQueueSize")]
    pub action_queue_size: usize,
    #[serde(rename = "activityCount")]
    pub activity_count: usize,
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: usize,
}

#[derive(Default)]
struct StoreState {
    /// Insertion-ordered; lookups are linear scans, which is fine under the
    /// 100-component ceiling and keeps eviction ties deterministic.
    components: Vec<ComponentState>,
    action_queue: VecDeque<ActionEvent>,
    activities: Vec<Activity>,
    sub_agents: Vec<SubAgent>,
}

/// The process-wide component store.
pub struct ComponentStore {
    state: RwLock<StoreState>,
    events: EventFanout,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            events: EventFanout::default(),
        }
    }

    /// Subscribe to store events. No replay: fetch a snapshot first.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Create a component, or re-render an existing ID in place (preserving
    /// `created_at` and bumping the version). Runs the cleanup pass after
    /// the mutation. Returns the resulting snapshot.
    pub async fn render(&self, request: RenderRequest) -> ComponentState {
        let now = now_millis();
        let mut state = self.state.write().await;

        let id = request
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| component_id(request.props.kind()));
        let existing = state.components.iter().position(|c| c.id == id);

        let (created_at, version) = match existing {
            Some(index) => {
                let prior = &state.components[index];
                (prior.created_at, prior.version + 1)
            }
            None => (now, 1),
        };

        let snapshot = ComponentState {
            id,
            props: request.props,
            location: request.location.unwrap_or_default(),
            position: request.position.unwrap_or_default(),
            timestamp: now,
            expires_at: now + request.ttl.unwrap_or(DEFAULT_TTL_MS),
            created_at,
            updated_at: now,
            version,
        };

        let payload = match existing {
            Some(index) => {
                state.components[index] = snapshot.clone();
                EventPayload::ComponentUpdate(snapshot.clone())
            }
            None => {
                state.components.push(snapshot.clone());
                EventPayload::ComponentRender(snapshot.clone())
            }
        };
        self.events.emit(StoreEvent::now(payload));

        self.cleanup_locked(&mut state, now);
        snapshot
    }

    /// Shallow-merge a partial props patch into an existing component.
    /// Returns `Ok(None)` when the ID does not exist; `Err` when the merged
    /// object no longer fits the component's variant.
    pub async fn update(
        &self,
        id: &str,
        patch: &serde_json::Map<String, Value>,
    ) -> Result<Option<ComponentState>, StoreError> {
        let now = now_millis();
        let mut state = self.state.write().await;

        let Some(index) = state.components.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let existing = &state.components[index];
        let props = merge_props(&existing.props, patch)?;
        let snapshot = ComponentState {
            props,
            updated_at: now,
            version: existing.version + 1,
            ..existing.clone()
        };

        state.components[index] = snapshot.clone();
        self.events
            .emit(StoreEvent::now(EventPayload::ComponentUpdate(
                snapshot.clone(),
            )));
        Ok(Some(snapshot))
    }

    /// Idempotent delete. Emits `component.remove` (ID only) when something
    /// was actually removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        self.remove_locked(&mut state, id)
    }

    /// Latest-known snapshot, without expiry filtering (cleanup is lazy).
    pub async fn get(&self, id: &str) -> Option<ComponentState> {
        let state = self.state.read().await;
        state.components.iter().find(|c| c.id == id).cloned()
    }

    /// All live snapshots at a location, ascending by render timestamp.
    pub async fn get_by_location(&self, location: Location) -> Vec<ComponentState> {
        let state = self.state.read().await;
        let mut components: Vec<ComponentState> = state
            .components
            .iter()
            .filter(|c| c.location == location)
            .cloned()
            .collect();
        components.sort_by_key(|c| c.timestamp);
        components
    }

    /// All live snapshots, ascending by render timestamp.
    pub async fn get_all(&self) -> Vec<ComponentState> {
        let state = self.state.read().await;
        let mut components = state.components.clone();
        components.sort_by_key(|c| c.timestamp);
        components
    }

    fn remove_locked(&self, state: &mut StoreState, id: &str) -> bool {
        let Some(index) = state.components.iter().position(|c| c.id == id) else {
            return false;
        };
        state.components.remove(index);
        self.events
            .emit(StoreEvent::now(EventPayload::ComponentRemove {
                component_id: id.to_string(),
            }));
        true
    }

    /// Sweep expired components, then evict oldest-by-timestamp above the
    /// ceiling. Both paths go through `remove_locked` so they emit.
    fn cleanup_locked(&self, state: &mut StoreState, now: u64) {
        let expired: Vec<String> = state
            .components
            .iter()
            .filter(|c| c.expires_at < now)
            .map(|c| c.id.clone())
            .collect();
        for id in expired {
            self.remove_locked(state, &id);
        }

        while state.components.len() > MAX_COMPONENTS {
            // Tie-break on index so equal timestamps evict in insertion order.
            let Some(oldest) = state
                .components
                .iter()
                .enumerate()
                .min_by_key(|(index, c)| (c.timestamp, *index))
                .map(|(_, c)| c.id.clone())
            else {
                break;
            };
            self.remove_locked(state, &oldest);
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Append to the action queue, emit `action.received`, then trim the
    /// queue to its ceiling by dropping oldest entries.
    pub async fn queue_action(&self, action: ActionEvent) {
        let mut state = self.state.write().await;
        state.action_queue.push_back(action.clone());
        self.events
            .emit(StoreEvent::now(EventPayload::ActionReceived(action)));
        while state.action_queue.len() > MAX_ACTIONS {
            state.action_queue.pop_front();
        }
    }

    /// Pop the oldest queued action. Strictly FIFO.
    pub async fn dequeue_action(&self) -> Option<ActionEvent> {
        let mut state = self.state.write().await;
        state.action_queue.pop_front()
    }

    /// Up to `count` oldest actions, without removing them.
    pub async fn peek_actions(&self, count: usize) -> Vec<ActionEvent> {
        let state = self.state.read().await;
        state.action_queue.iter().take(count).cloned().collect()
    }

    pub async fn action_count(&self) -> usize {
        let state = self.state.read().await;
        state.action_queue.len()
    }

    // ========================================================================
    // Activities
    // ========================================================================

    /// Add an activity, overwriting in place when the ID already exists.
    /// The list is re-sorted timestamp-descending and capped; every change
    /// emits the whole current list.
    pub async fn add_activity(&self, activity: Activity) {
        let mut state = self.state.write().await;
        match state.activities.iter().position(|a| a.id == activity.id) {
            Some(index) => state.activities[index] = activity,
            None => state.activities.push(activity),
        }
        state.activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        state.activities.truncate(MAX_ACTIVITIES);
        self.emit_activities_locked(&state);
    }

    /// Patch an existing activity. A missing ID is a silent no-op; this is
    /// deliberately more lenient than component updates.
    pub async fn update_activity(&self, id: &str, patch: &ActivityPatch) {
        let mut state = self.state.write().await;
        let Some(activity) = state.activities.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if let Some(status) = patch.status {
            activity.status = status;
        }
        if let Some(title) = &patch.title {
            activity.title = title.clone();
        }
        if let Some(description) = &patch.description {
            activity.description = Some(description.clone());
        }
        if let Some(progress) = patch.progress {
            activity.progress = Some(progress);
        }
        self.emit_activities_locked(&state);
    }

    pub async fn get_activities(&self) -> Vec<Activity> {
        let state = self.state.read().await;
        state.activities.clone()
    }

    /// Drop all activities and emit the (now empty) list.
    pub async fn clear_activities(&self) {
        let mut state = self.state.write().await;
        state.activities.clear();
        self.emit_activities_locked(&state);
    }

    fn emit_activities_locked(&self, state: &StoreState) {
        self.events
            .emit(StoreEvent::now(EventPayload::ActivityUpdate(
                ActivitySnapshot {
                    activities: state.activities.clone(),
                    timestamp: now_millis(),
                },
            )));
    }

    // ========================================================================
    // Sub-agents
    // ========================================================================

    /// Add a sub-agent, overwriting in place when the ID already exists.
    /// The stored list stays flat; `children` is cleared on insert. Returns
    /// the stored snapshot.
    pub async fn add_sub_agent(&self, mut agent: SubAgent) -> SubAgent {
        agent.children.clear();
        if agent.created_at == 0 {
            agent.created_at = now_millis();
        }
        let mut state = self.state.write().await;
        match state.sub_agents.iter().position(|a| a.id == agent.id) {
            Some(index) => state.sub_agents[index] = agent.clone(),
            None => state.sub_agents.push(agent.clone()),
        }
        agent
    }

    /// Patch an existing sub-agent. A missing ID is a silent no-op.
    pub async fn update_sub_agent(&self, id: &str, patch: &SubAgentPatch) {
        let mut state = self.state.write().await;
        let Some(agent) = state.sub_agents.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if let Some(label) = &patch.label {
            agent.label = label.clone();
        }
        if let Some(status) = patch.status {
            agent.status = status;
        }
        if let Some(completed_at) = patch.completed_at {
            agent.completed_at = Some(completed_at);
        }
        if let Some(task) = &patch.task {
            agent.task = Some(task.clone());
        }
    }

    pub async fn get_sub_agents(&self) -> Vec<SubAgent> {
        let state = self.state.read().await;
        state.sub_agents.clone()
    }

    /// Derive the sub-agent forest from the flat list. Never cached.
    pub async fn sub_agent_tree(&self) -> Vec<SubAgent> {
        let state = self.state.read().await;
        crate::tree::build_sub_agent_tree(&state.sub_agents)
    }

    // ========================================================================
    // Utility
    // ========================================================================

    /// Wipe all state unconditionally. Emits nothing: a full reset, not an
    /// incremental change.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.components.clear();
        state.action_queue.clear();
        state.activities.clear();
        state.sub_agents.clear();
    }

    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            component_count: state.components.len(),
            action_queue_size: state.action_queue.len(),
            activity_count: state.activities.len(),
            subscriber_count: self.events.subscriber_count(),
        }
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shallow-merge a JSON patch into the props object of a typed variant and
/// re-type the result as the same variant.
fn merge_props(
    props: &ComponentProps,
    patch: &serde_json::Map<String, Value>,
) -> Result<ComponentProps, StoreError> {
    let kind = props.kind();
    let invalid = |message: String| StoreError::InvalidPatch { kind, message };

    let mut tagged = serde_json::to_value(props).map_err(|e| invalid(e.to_string()))?;
    let Some(inner) = tagged.get_mut("props") else {
        return Err(invalid("missing props object".to_string()));
    };
    if !inner.is_object() {
        *inner = Value::Object(serde_json::Map::new());
    }
    if let Some(object) = inner.as_object_mut() {
        for (key, value) in patch {
            object.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(tagged).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2ui_protocol::{ActionKind, ActivityKind, CardProps, ProgressProps, Status};
    use serde_json::json;

    fn card(title: &str) -> ComponentProps {
        ComponentProps::Card(CardProps {
            title: Some(title.to_string()),
            ..Default::default()
        })
    }

    fn progress(current: f64, total: f64) -> ComponentProps {
        ComponentProps::Progress(ProgressProps {
            current: Some(current),
            total: Some(total),
            ..Default::default()
        })
    }

    fn action(component_id: &str, name: &str) -> ActionEvent {
        ActionEvent::named(component_id, name)
    }

    fn activity(id: &str, title: &str, timestamp: u64) -> Activity {
        Activity {
            id: id.to_string(),
            kind: ActivityKind::Progress,
            status: Status::Active,
            title: title.to_string(),
            description: None,
            progress: None,
            timestamp,
            parent_id: None,
        }
    }

    #[tokio::test]
    async fn render_generates_prefixed_id_and_defaults() {
        let store = ComponentStore::new();
        let snapshot = store.render(RenderRequest::new(card("X"))).await;
        assert!(snapshot.id.starts_with("card-"), "id: {}", snapshot.id);
        assert_eq!(snapshot.location, Location::Chat);
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.expires_at >= snapshot.timestamp + DEFAULT_TTL_MS);
    }

    #[tokio::test]
    async fn version_increments_by_one_per_mutation() {
        let store = ComponentStore::new();
        let first = store
            .render(RenderRequest::new(card("one")).with_id("c1"))
            .await;
        assert_eq!(first.version, 1);

        let second = store
            .render(RenderRequest::new(card("two")).with_id("c1"))
            .await;
        assert_eq!(second.version, 2);
        assert_eq!(second.created_at, first.created_at);

        let patch = json!({ "title": "three" });
        let third = store
            .update("c1", patch.as_object().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(third.version, 3);
        assert_eq!(third.created_at, first.created_at);
    }

    #[tokio::test]
    async fn update_merges_shallowly_and_keeps_untouched_fields() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(progress(3.0, 10.0)).with_id("p1"))
            .await;

        let patch = json!({ "current": 7.0 });
        let updated = store
            .update("p1", patch.as_object().unwrap())
            .await
            .unwrap()
            .unwrap();

        match updated.props {
            ComponentProps::Progress(p) => {
                assert_eq!(p.current, Some(7.0));
                assert_eq!(p.total, Some(10.0));
            }
            other => panic!("unexpected props: {other:?}"),
        }
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn update_missing_id_returns_none() {
        let store = ComponentStore::new();
        let patch = serde_json::Map::new();
        assert!(store.update("ghost", &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_with_type_breaking_patch_is_an_error() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(progress(1.0, 2.0)).with_id("p1"))
            .await;
        let patch = json!({ "current": "not-a-number" });
        let result = store.update("p1", patch.as_object().unwrap()).await;
        assert!(matches!(result, Err(StoreError::InvalidPatch { .. })));
    }

    #[tokio::test]
    async fn remove_is_idempotent_and_clears_reads() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(card("X")).with_id("c1"))
            .await;

        assert!(store.remove("c1").await);
        assert!(store.get("c1").await.is_none());
        assert!(store.get_all().await.is_empty());
        assert!(store
            .get_by_location(Location::Chat)
            .await
            .is_empty());
        assert!(!store.remove("c1").await);
    }

    #[tokio::test]
    async fn remove_emits_only_when_something_was_removed() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(card("X")).with_id("c1"))
            .await;
        let mut rx = store.subscribe();

        store.remove("c1").await;
        store.remove("c1").await;

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event.payload,
            EventPayload::ComponentRemove { ref component_id } if component_id == "c1"
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_first() {
        let store = ComponentStore::new();
        for i in 0..=MAX_COMPONENTS {
            store
                .render(RenderRequest::new(card("X")).with_id(format!("comp-{i}")))
                .await;
        }

        let all = store.get_all().await;
        assert_eq!(all.len(), MAX_COMPONENTS);
        assert!(store.get("comp-0").await.is_none());
        assert!(store.get("comp-1").await.is_some());
    }

    #[tokio::test]
    async fn expired_components_are_swept_by_the_next_render() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(card("short")).with_id("short").with_ttl(1))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        store
            .render(RenderRequest::new(card("long")).with_id("long"))
            .await;

        let ids: Vec<String> = store.get_all().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["long".to_string()]);
    }

    #[tokio::test]
    async fn get_reads_through_past_ttl_until_cleanup() {
        let store = ComponentStore::new();
        store
            .render(RenderRequest::new(card("short")).with_id("short").with_ttl(1))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        // Cleanup is lazy; get still returns the latest-known state.
        assert!(store.get("short").await.is_some());
    }

    #[tokio::test]
    async fn action_queue_is_fifo_and_capped_at_newest_fifty() {
        let store = ComponentStore::new();
        for i in 0..(MAX_ACTIONS + 10) {
            store.queue_action(action("c1", &format!("a{i}"))).await;
        }
        assert_eq!(store.action_count().await, MAX_ACTIONS);

        // Oldest 10 were dropped; dequeue yields the newest 50 in their
        // submission order.
        let first = store.dequeue_action().await.unwrap();
        assert_eq!(first.action.as_deref(), Some("a10"));
        let second = store.dequeue_action().await.unwrap();
        assert_eq!(second.action.as_deref(), Some("a11"));
    }

    #[tokio::test]
    async fn peek_does_not_consume() {
        let store = ComponentStore::new();
        store.queue_action(action("c1", "first")).await;
        store.queue_action(action("c1", "second")).await;

        let peeked = store.peek_actions(1).await;
        assert_eq!(peeked.len(), 1);
        assert_eq!(peeked[0].action.as_deref(), Some("first"));
        assert_eq!(store.action_count().await, 2);
    }

    #[tokio::test]
    async fn queue_accepts_dangling_component_references() {
        let store = ComponentStore::new();
        let mut event = action("missing-id", "approve");
        event.kind = ActionKind::Action;
        store.queue_action(event).await;
        assert_eq!(store.action_count().await, 1);
    }

    #[tokio::test]
    async fn add_activity_overwrites_by_id() {
        let store = ComponentStore::new();
        store.add_activity(activity("a1", "Building", 10)).await;
        store.add_activity(activity("a1", "Built", 20)).await;

        let activities = store.get_activities().await;
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].title, "Built");
    }

    #[tokio::test]
    async fn activities_sorted_descending_and_capped() {
        let store = ComponentStore::new();
        for i in 0..(MAX_ACTIVITIES + 5) {
            store
                .add_activity(activity(&format!("a{i}"), "t", i as u64))
                .await;
        }

        let activities = store.get_activities().await;
        assert_eq!(activities.len(), MAX_ACTIVITIES);
        assert!(activities
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
        // The oldest entries fell off.
        assert!(activities.iter().all(|a| a.timestamp >= 5));
    }

    #[tokio::test]
    async fn update_activity_missing_id_is_a_silent_noop() {
        let store = ComponentStore::new();
        let mut rx = store.subscribe();
        store
            .update_activity(
                "ghost",
                &ActivityPatch {
                    title: Some("nope".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(rx.try_recv().is_err());
        assert!(store.get_activities().await.is_empty());
    }

    #[tokio::test]
    async fn activity_events_carry_the_full_list() {
        let store = ComponentStore::new();
        store.add_activity(activity("a1", "one", 1)).await;
        let mut rx = store.subscribe();
        store.add_activity(activity("a2", "two", 2)).await;

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::ActivityUpdate(snapshot) => {
                assert_eq!(snapshot.activities.len(), 2)
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sub_agents_upsert_by_id_and_stay_flat() {
        let store = ComponentStore::new();
        let agent = SubAgent {
            id: "s1".into(),
            label: "One".into(),
            status: Status::Active,
            parent_id: None,
            created_at: 0,
            completed_at: None,
            task: None,
            children: Vec::new(),
        };
        let stored = store.add_sub_agent(agent.clone()).await;
        assert!(stored.created_at > 0);

        store
            .add_sub_agent(SubAgent {
                label: "One Renamed".into(),
                ..agent
            })
            .await;
        store
            .update_sub_agent(
                "s1",
                &SubAgentPatch {
                    status: Some(Status::Completed),
                    ..Default::default()
                },
            )
            .await;

        let flat = store.get_sub_agents().await;
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].label, "One Renamed");
        assert_eq!(flat[0].status, Status::Completed);
        assert!(flat[0].children.is_empty());
    }

    #[tokio::test]
    async fn clear_wipes_everything_without_events() {
        let store = ComponentStore::new();
        store.render(RenderRequest::new(card("X"))).await;
        store.queue_action(action("c", "a")).await;
        store.add_activity(activity("a1", "t", 1)).await;

        let mut rx = store.subscribe();
        store.clear().await;
        assert!(rx.try_recv().is_err());

        let stats = store.stats().await;
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.action_queue_size, 0);
        assert_eq!(stats.activity_count, 0);
        assert_eq!(stats.subscriber_count, 1);
    }

    #[tokio::test]
    async fn round_trip_preserves_props_kind_and_location() {
        let store = ComponentStore::new();
        let rendered = store
            .render(
                RenderRequest::new(card("X"))
                    .with_id("c1")
                    .with_location(Location::Sidebar),
            )
            .await;
        let fetched = store.get("c1").await.unwrap();
        assert_eq!(fetched.props, rendered.props);
        assert_eq!(fetched.location, Location::Sidebar);
    }

    #[tokio::test]
    async fn events_are_emitted_in_mutation_order() {
        let store = ComponentStore::new();
        let mut rx = store.subscribe();

        store
            .render(RenderRequest::new(card("X")).with_id("c1"))
            .await;
        store
            .render(RenderRequest::new(card("Y")).with_id("c1"))
            .await;
        store.remove("c1").await;

        assert!(matches!(
            rx.recv().await.unwrap().payload,
            EventPayload::ComponentRender(_)
        ));
        assert!(matches!(
            rx.recv().await.unwrap().payload,
            EventPayload::ComponentUpdate(_)
        ));
        assert!(matches!(
            rx.recv().await.unwrap().payload,
            EventPayload::ComponentRemove { .. }
        ));
    }
}
