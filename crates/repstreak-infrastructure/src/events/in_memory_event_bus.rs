use async_trait::async_trait;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use repstreak_domain::events::{
    DomainEvent, DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper,
};
use repstreak_domain::shared::DomainError;

type HandlerMap = HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>;

/// In-process event bus
///
/// Handlers run in subscription order on the publisher's task. A failing
/// handler is logged and does not stop the others or fail the publish.
#[derive(Default)]
pub struct InMemoryEventBus {
    handlers: RwLock<HandlerMap>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type-erased handler under the event type it accepts
    pub async fn subscribe(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = handler.event_type_name();
        debug!(
            "Subscribing {} to {}",
            handler.handler_name(),
            event_type_name
        );

        self.handlers
            .write()
            .await
            .entry(event_type_name)
            .or_default()
            .push(handler);
    }

    /// Register a typed handler for events of type `E`
    pub async fn subscribe_typed<E, H>(&self, handler: H)
    where
        E: DomainEvent,
        H: EventHandler<E> + 'static,
    {
        self.subscribe(Arc::new(TypedEventHandlerWrapper::<E, H>::new(handler)))
            .await;
    }

    pub async fn handler_count<E: DomainEvent>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();

        // Clone the list so handlers may publish without holding the lock
        let subscribed = {
            let handlers = self.handlers.read().await;
            handlers.get(event_type_name).cloned().unwrap_or_default()
        };

        if subscribed.is_empty() {
            debug!("No handlers registered for {}", event_type_name);
            return Ok(());
        }

        for handler in subscribed {
            if let Err(e) = handler.handle_dynamic(event.as_ref()).await {
                error!(
                    "{} failed on {}: {}",
                    handler.handler_name(),
                    event_type_name,
                    e
                );
            }
        }

        Ok(())
    }
}
