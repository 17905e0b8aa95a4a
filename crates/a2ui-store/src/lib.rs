//! The stateful core of the A2UI service: component store, broadcast event
//! fanout, and the action-handler registry.
#![allow(missing_docs)]

pub mod actions;
pub mod fanout;
pub mod store;
mod tree;

pub use actions::{
    ActionHandler, ActionRegistry, FnHandler, HandlerError, HandlerId, HandlerOptions,
    RegistryStats,
};
pub use fanout::EventFanout;
pub use store::{ComponentStore, StoreError, StoreStats};
pub use tree::build_sub_agent_tree;
