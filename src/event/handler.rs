//! Event bus: strongly-typed subscriber lists, one per event type.
//!
//! [`EventBus`] stores a handler list per concrete [`FrameEvent`] type, keyed by
//! its `TypeId`. Emitting an event calls every handler subscribed to that type in
//! subscription order.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::message::FrameEvent;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    event: TypeId,
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Type-erased handler list so `unsubscribe` works without knowing `E`.
trait HandlerList {
    fn remove(&mut self, id: u64) -> bool;
    fn len(&self) -> usize;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Handlers<E: FrameEvent> {
    entries: Vec<(u64, Handler<E>)>,
}

impl<E: FrameEvent> HandlerList for Handlers<E> {
    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Typed observer registry.
#[derive(Default)]
pub struct EventBus {
    lists: HashMap<TypeId, Box<dyn HandlerList>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of type `E`.
    pub fn subscribe<E: FrameEvent>(&mut self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        let event = TypeId::of::<E>();
        let list = self
            .lists
            .entry(event)
            .or_insert_with(|| Box::new(Handlers::<E> { entries: Vec::new() }));
        if let Some(handlers) = list.as_any_mut().downcast_mut::<Handlers<E>>() {
            handlers.entries.push((id, Box::new(handler)));
        }
        Subscription { id, event }
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.lists
            .get_mut(&subscription.event)
            .is_some_and(|list| list.remove(subscription.id))
    }

    /// Deliver `event` to every subscriber of its type.
    pub fn emit<E: FrameEvent>(&mut self, event: &E) {
        tracing::trace!(event = event.event_name(), "emit");
        if let Some(list) = self.lists.get_mut(&TypeId::of::<E>()) {
            if let Some(handlers) = list.as_any_mut().downcast_mut::<Handlers<E>>() {
                for (_, handler) in handlers.entries.iter_mut() {
                    handler(event);
                }
            }
        }
    }

    /// Number of subscribers for `E`.
    pub fn subscriber_count<E: FrameEvent>(&self) -> usize {
        self.lists.get(&TypeId::of::<E>()).map_or(0, |list| list.len())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.lists.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
