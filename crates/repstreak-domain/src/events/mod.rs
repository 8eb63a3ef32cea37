use std::any::Any;

pub mod event_bus;
pub mod stats_events;

pub use event_bus::{DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper};

/// Something that happened to a user's data
pub trait DomainEvent: Send + Sync + Any {
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Routing key, the full Rust type name of the event
    fn event_type_name(&self) -> &'static str;
}
