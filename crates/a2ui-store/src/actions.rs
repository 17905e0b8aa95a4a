//! Action-handler registry: lets agent-side glue react to user actions
//! independently of the HTTP boundary.
//!
//! Three registration styles: scoped to a named action, scoped to any
//! action, and one-shot. A registration may be restricted to component
//! kinds, resolved against the store at dispatch time; if the originating
//! component is gone, kind-scoped handlers skip while unscoped ones still
//! fire. Matching handlers run concurrently and failures are logged, never
//! rethrown. No lock is held while handlers run, so a handler may call back
//! into the store or the registry.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::warn;

use a2ui_protocol::{ActionEvent, ComponentKind};

use crate::store::ComponentStore;

/// Well-known action names emitted by the stock components.
pub mod common {
    pub const DISMISS: &str = "dismiss";
    pub const CONFIRM: &str = "confirm";
    pub const CANCEL: &str = "cancel";
    pub const SUBMIT: &str = "submit";
    pub const RETRY: &str = "retry";
    pub const COPY: &str = "copy";
    pub const RUN: &str = "run";
    pub const REFRESH: &str = "refresh";
}

/// Failure raised by a handler; logged at the dispatch boundary.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// A reaction to a dispatched action event.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, event: &ActionEvent) -> Result<(), HandlerError>;
}

/// Adapter so plain async closures can register as handlers.
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F, Fut> ActionHandler for FnHandler<F>
where
    F: Fn(ActionEvent) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    async fn handle(&self, event: &ActionEvent) -> Result<(), HandlerError> {
        (self.0)(event.clone()).await
    }
}

/// Registration options.
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    /// Unregister after the first dispatch attempt completes, success or
    /// failure.
    pub once: bool,
    /// Only fire when the originating component currently has one of these
    /// kinds. Empty means unrestricted.
    pub component_kinds: Vec<ComponentKind>,
}

/// Unsubscribe capability returned by every registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Handler counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub action_handlers: usize,
    pub global_handlers: usize,
}

struct Registration {
    id: u64,
    handler: Arc<dyn ActionHandler>,
    once: bool,
    component_kinds: Vec<ComponentKind>,
}

impl Registration {
    fn matches(&self, kind: Option<ComponentKind>) -> bool {
        if self.component_kinds.is_empty() {
            return true;
        }
        kind.is_some_and(|k| self.component_kinds.contains(&k))
    }
}

#[derive(Default)]
struct RegistryState {
    by_action: std::collections::HashMap<String, Vec<Registration>>,
    any_action: Vec<Registration>,
    next_id: u64,
}

impl RegistryState {
    fn register(
        &mut self,
        action: Option<&str>,
        handler: Arc<dyn ActionHandler>,
        options: HandlerOptions,
    ) -> HandlerId {
        self.next_id += 1;
        let registration = Registration {
            id: self.next_id,
            handler,
            once: options.once,
            component_kinds: options.component_kinds,
        };
        match action {
            Some(action) => self
                .by_action
                .entry(action.to_string())
                .or_default()
                .push(registration),
            None => self.any_action.push(registration),
        }
        HandlerId(self.next_id)
    }

    fn unregister(&mut self, id: HandlerId) -> bool {
        for handlers in self.by_action.values_mut() {
            if let Some(index) = handlers.iter().position(|r| r.id == id.0) {
                handlers.remove(index);
                return true;
            }
        }
        if let Some(index) = self.any_action.iter().position(|r| r.id == id.0) {
            self.any_action.remove(index);
            return true;
        }
        false
    }
}

/// Removes the originating component; the default reaction to `dismiss`
/// and `cancel`.
struct RemoveComponentHandler {
    store: Arc<ComponentStore>,
}

#[async_trait]
impl ActionHandler for RemoveComponentHandler {
    async fn handle(&self, event: &ActionEvent) -> Result<(), HandlerError> {
        self.store.remove(&event.component_id).await;
        Ok(())
    }
}

/// The process-wide action-handler registry.
pub struct ActionRegistry {
    store: Arc<ComponentStore>,
    state: RwLock<RegistryState>,
    default_dismiss: HandlerId,
    default_cancel: HandlerId,
}

impl ActionRegistry {
    /// Create a registry bound to a store, with the default dismiss/cancel
    /// auto-removal handlers pre-registered.
    pub fn new(store: Arc<ComponentStore>) -> Self {
        let mut state = RegistryState::default();
        let default_dismiss = state.register(
            Some(common::DISMISS),
            Arc::new(RemoveComponentHandler {
                store: store.clone(),
            }),
            HandlerOptions::default(),
        );
        let default_cancel = state.register(
            Some(common::CANCEL),
            Arc::new(RemoveComponentHandler {
                store: store.clone(),
            }),
            HandlerOptions::default(),
        );
        Self {
            store,
            state: RwLock::new(state),
            default_dismiss,
            default_cancel,
        }
    }

    /// Capability for unregistering the built-in dismiss handler.
    pub fn default_dismiss_id(&self) -> HandlerId {
        self.default_dismiss
    }

    /// Capability for unregistering the built-in cancel handler.
    pub fn default_cancel_id(&self) -> HandlerId {
        self.default_cancel
    }

    /// Register a handler for a named action.
    pub async fn on(
        &self,
        action: &str,
        handler: Arc<dyn ActionHandler>,
        options: HandlerOptions,
    ) -> HandlerId {
        let mut state = self.state.write().await;
        state.register(Some(action), handler, options)
    }

    /// Register a one-shot handler for a named action.
    pub async fn once(&self, action: &str, handler: Arc<dyn ActionHandler>) -> HandlerId {
        self.on(
            action,
            handler,
            HandlerOptions {
                once: true,
                ..Default::default()
            },
        )
        .await
    }

    /// Register a handler for every action.
    pub async fn on_any(&self, handler: Arc<dyn ActionHandler>, options: HandlerOptions) -> HandlerId {
        let mut state = self.state.write().await;
        state.register(None, handler, options)
    }

    /// Unregister by capability. Returns whether anything was removed.
    pub async fn off(&self, id: HandlerId) -> bool {
        let mut state = self.state.write().await;
        state.unregister(id)
    }

    /// Drop every handler registered for a named action.
    pub async fn off_action(&self, action: &str) {
        let mut state = self.state.write().await;
        state.by_action.remove(action);
    }

    /// Drop all handlers, defaults included.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.by_action.clear();
        state.any_action.clear();
    }

    pub async fn stats(&self) -> RegistryStats {
        let state = self.state.read().await;
        RegistryStats {
            action_handlers: state.by_action.values().map(Vec::len).sum(),
            global_handlers: state.any_action.len(),
        }
    }

    /// Dispatch an action event to every matching handler.
    pub async fn dispatch(&self, event: &ActionEvent) {
        let kind = self
            .store
            .get(&event.component_id)
            .await
            .map(|c| c.props.kind());

        let (handlers, once_ids) = {
            let state = self.state.read().await;
            let mut handlers: Vec<Arc<dyn ActionHandler>> = Vec::new();
            let mut once_ids: Vec<HandlerId> = Vec::new();

            if let Some(action) = event.action.as_deref() {
                if let Some(named) = state.by_action.get(action) {
                    for registration in named {
                        if registration.matches(kind) {
                            handlers.push(registration.handler.clone());
                            if registration.once {
                                once_ids.push(HandlerId(registration.id));
                            }
                        }
                    }
                }
            }
            for registration in &state.any_action {
                if registration.matches(kind) {
                    handlers.push(registration.handler.clone());
                    if registration.once {
                        once_ids.push(HandlerId(registration.id));
                    }
                }
            }
            (handlers, once_ids)
        };

        let outcomes = join_all(handlers.iter().map(|h| h.handle(event))).await;
        for outcome in outcomes {
            if let Err(err) = outcome {
                warn!(
                    action = event.action.as_deref().unwrap_or(""),
                    component_id = %event.component_id,
                    error = %err,
                    "action handler failed"
                );
            }
        }

        if !once_ids.is_empty() {
            let mut state = self.state.write().await;
            for id in once_ids {
                state.unregister(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2ui_protocol::{CardProps, ComponentProps, RenderRequest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handler(counter: Arc<AtomicUsize>) -> Arc<dyn ActionHandler> {
        Arc::new(FnHandler(move |_event: ActionEvent| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }))
    }

    fn failing_handler() -> Arc<dyn ActionHandler> {
        Arc::new(FnHandler(|_event: ActionEvent| async {
            Err(HandlerError::from("boom"))
        }))
    }

    async fn rendered_card(store: &ComponentStore, id: &str) {
        store
            .render(
                RenderRequest::new(ComponentProps::Card(CardProps::default())).with_id(id),
            )
            .await;
    }

    #[tokio::test]
    async fn named_and_any_handlers_both_fire() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store);

        let named = Arc::new(AtomicUsize::new(0));
        let any = Arc::new(AtomicUsize::new(0));
        registry
            .on("approve", counting_handler(named.clone()), HandlerOptions::default())
            .await;
        registry
            .on_any(counting_handler(any.clone()), HandlerOptions::default())
            .await;

        registry.dispatch(&ActionEvent::named("c1", "approve")).await;
        registry.dispatch(&ActionEvent::named("c1", "other")).await;

        assert_eq!(named.load(Ordering::SeqCst), 1);
        assert_eq!(any.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn one_shot_unregisters_after_dispatch_even_on_failure() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store);

        registry.once("retry", failing_handler()).await;
        let before = registry.stats().await;
        registry.dispatch(&ActionEvent::named("c1", "retry")).await;
        registry.dispatch(&ActionEvent::named("c1", "retry")).await;
        let after = registry.stats().await;

        assert_eq!(before.action_handlers, after.action_handlers + 1);
    }

    #[tokio::test]
    async fn failures_are_isolated_from_other_handlers() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store);

        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .on("go", failing_handler(), HandlerOptions::default())
            .await;
        registry
            .on("go", counting_handler(counter.clone()), HandlerOptions::default())
            .await;

        registry.dispatch(&ActionEvent::named("c1", "go")).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn kind_filter_skips_when_component_is_gone() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        let scoped = Arc::new(AtomicUsize::new(0));
        let unscoped = Arc::new(AtomicUsize::new(0));
        registry
            .on(
                "go",
                counting_handler(scoped.clone()),
                HandlerOptions {
                    component_kinds: vec![ComponentKind::Card],
                    ..Default::default()
                },
            )
            .await;
        registry
            .on("go", counting_handler(unscoped.clone()), HandlerOptions::default())
            .await;

        // Component exists with the right kind: both fire.
        rendered_card(&store, "c1").await;
        registry.dispatch(&ActionEvent::named("c1", "go")).await;
        assert_eq!(scoped.load(Ordering::SeqCst), 1);
        assert_eq!(unscoped.load(Ordering::SeqCst), 1);

        // Component removed: the kind-scoped handler skips.
        store.remove("c1").await;
        registry.dispatch(&ActionEvent::named("c1", "go")).await;
        assert_eq!(scoped.load(Ordering::SeqCst), 1);
        assert_eq!(unscoped.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn default_dismiss_and_cancel_remove_the_component() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        rendered_card(&store, "c1").await;
        registry.dispatch(&ActionEvent::named("c1", common::DISMISS)).await;
        assert!(store.get("c1").await.is_none());

        rendered_card(&store, "c2").await;
        registry.dispatch(&ActionEvent::named("c2", common::CANCEL)).await;
        assert!(store.get("c2").await.is_none());
    }

    #[tokio::test]
    async fn default_can_be_unregistered_via_capability() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        assert!(registry.off(registry.default_dismiss_id()).await);
        rendered_card(&store, "c1").await;
        registry.dispatch(&ActionEvent::named("c1", common::DISMISS)).await;
        assert!(store.get("c1").await.is_some());

        assert!(registry.off(registry.default_cancel_id()).await);
        registry.dispatch(&ActionEvent::named("c1", common::CANCEL)).await;
        assert!(store.get("c1").await.is_some());
    }

    #[tokio::test]
    async fn extra_handlers_run_alongside_the_default() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        let counter = Arc::new(AtomicUsize::new(0));
        registry
            .on(common::DISMISS, counting_handler(counter.clone()), HandlerOptions::default())
            .await;

        rendered_card(&store, "c1").await;
        registry.dispatch(&ActionEvent::named("c1", common::DISMISS)).await;
        assert!(store.get("c1").await.is_none());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handlers_may_reenter_the_store() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        let render_store = store.clone();
        registry
            .on(
                "spawn",
                Arc::new(FnHandler(move |_event: ActionEvent| {
                    let store = render_store.clone();
                    async move {
                        store
                            .render(
                                RenderRequest::new(ComponentProps::Card(CardProps::default()))
                                    .with_id("spawned"),
                            )
                            .await;
                        Ok(())
                    }
                })),
                HandlerOptions::default(),
            )
            .await;

        registry.dispatch(&ActionEvent::named("c1", "spawn")).await;
        assert!(store.get("spawned").await.is_some());
    }

    #[tokio::test]
    async fn off_action_drops_every_handler_for_that_action() {
        let store = Arc::new(ComponentStore::new());
        let registry = ActionRegistry::new(store.clone());

        registry.off_action(common::DISMISS).await;
        rendered_card(&store, "c1").await;
        registry.dispatch(&ActionEvent::named("c1", common::DISMISS)).await;
        assert!(store.get("c1").await.is_some());
    }
}
