use async_trait::async_trait;
use std::marker::PhantomData;

use super::DomainEvent;
use crate::shared::DomainError;

/// Delivers events to whoever subscribed to their type
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

/// Reacts to one concrete event type
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;

    /// Label used in logs when this handler fails
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Object-safe handler, as stored by a bus
#[async_trait]
pub trait DynamicEventHandler: Send + Sync {
    async fn handle_dynamic(&self, event: &dyn DomainEvent) -> Result<(), DomainError>;

    /// Routing key; must equal `DomainEvent::event_type_name` of accepted events
    fn event_type_name(&self) -> &'static str;

    fn handler_name(&self) -> &'static str;
}

/// Adapts an [`EventHandler<E>`] to [`DynamicEventHandler`] by downcasting
pub struct TypedEventHandlerWrapper<E: DomainEvent, H: EventHandler<E>> {
    handler: H,
    _event: PhantomData<fn(E)>,
}

impl<E: DomainEvent, H: EventHandler<E>> TypedEventHandlerWrapper<E, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }
}

#[async_trait]
impl<E: DomainEvent, H: EventHandler<E>> DynamicEventHandler for TypedEventHandlerWrapper<E, H> {
    async fn handle_dynamic(&self, event: &dyn DomainEvent) -> Result<(), DomainError> {
        let Some(typed) = event.as_any().downcast_ref::<E>() else {
            return Err(DomainError::Infrastructure(format!(
                "{} cannot handle {}",
                self.handler.name(),
                event.event_type_name()
            )));
        };

        self.handler.handle(typed).await
    }

    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }

    fn handler_name(&self) -> &'static str {
        self.handler.name()
    }
}
