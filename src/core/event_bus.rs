//! Pub/Sub event bus for timeline change notifications.
//!
//! - `subscribe()` registers a callback per event type, invoked synchronously on emit
//! - `emit()` runs the callbacks AND queues the event for deferred `poll()`
//! - `emitter()` hands out a cloneable sender for the timeline
//!
//! Callback order is FIFO within one event type. Nothing is guaranteed
//! across different event types.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// State shared between the bus and all of its emitters
#[derive(Default)]
struct Shared {
    subscribers: RwLock<HashMap<TypeId, Vec<Callback>>>,
    queue: Mutex<Vec<BoxedEvent>>,
}

impl Shared {
    fn dispatch<E: Event + Clone>(&self, event: E) {
        // Clone the callback list so a subscriber may itself subscribe/emit
        // without deadlocking on the subscribers lock.
        let callbacks = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&TypeId::of::<E>())
            .cloned();
        if let Some(cbs) = callbacks {
            for cb in &cbs {
                cb(&event);
            }
        }

        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!(
                "EventBus queue full ({} events), evicting oldest {}",
                queue.len(),
                evict_count
            );
            queue.drain(0..evict_count);
        }
        queue.push(Box::new(event));
    }
}

/// Pub/Sub event bus with deferred processing support.
#[derive(Clone, Default)]
pub struct EventBus {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("queue_len", &self.queue_len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of type E.
    ///
    /// # Example
    /// ```ignore
    /// bus.subscribe::<ViewRangeChangedEvent, _>(|e| log::info!("view -> {}", e.0));
    /// ```
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: Callback = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Invoke callbacks immediately, then queue for `poll()`.
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.shared.dispatch(event);
    }

    /// Drain all queued events (oldest first).
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.shared.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Cloneable emitter handle sharing this bus.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            shared: Some(Arc::clone(&self.shared)),
        }
    }

    /// Clear subscribers for type E
    pub fn unsubscribe_all<E: Event>(&self) {
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&TypeId::of::<E>());
    }

    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.shared
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&TypeId::of::<E>())
            .is_some_and(|v| !v.is_empty())
    }

    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Emitter handle. The default value is detached and drops every event,
/// so a timeline can be used without a bus.
#[derive(Clone, Default)]
pub struct EventEmitter {
    shared: Option<Arc<Shared>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl EventEmitter {
    /// Emitter that drops everything
    pub fn detached() -> Self {
        Self { shared: None }
    }

    pub fn is_attached(&self) -> bool {
        self.shared.is_some()
    }

    pub fn emit<E: Event + Clone>(&self, event: E) {
        if let Some(shared) = &self.shared {
            shared.dispatch(event);
        }
    }
}

/// Downcast a queued event to its concrete type.
///
/// Must deref to `dyn Event` before `as_any()`: the blanket impl also
/// covers `Box<dyn Event>` itself, which would hide the inner type.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}
