//! Publish/subscribe with one-time listeners and parent propagation
//!
//! Dispatch is synchronous and non-isolating: a panicking listener unwinds
//! through `fire` to its caller. No registry borrow is held while a listener
//! runs, so listeners may freely register, remove or fire.

use crate::events::event::{Event, EventData, EventTarget};
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// A registered callback. Identity is the allocation, so keep the `Rc` to
/// remove it again.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Wraps a closure into a [`Listener`]
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&Event) + 'static,
{
    Rc::new(callback)
}

/// Extra payload merged into every event forwarded to the parent
#[derive(Clone)]
pub enum ParentData {
    Static(EventData),
    /// Evaluated once per forwarded event
    Dynamic(Rc<dyn Fn() -> EventData>),
}

impl ParentData {
    fn resolve(&self) -> EventData {
        match self {
            ParentData::Static(data) => data.clone(),
            ParentData::Dynamic(producer) => producer(),
        }
    }
}

type Registry = RefCell<FxHashMap<String, Vec<Listener>>>;

static NEXT_TARGET: AtomicU64 = AtomicU64::new(1);

struct EventedInner {
    target: EventTarget,
    listeners: Registry,
    one_time_listeners: Registry,
    parent: RefCell<Option<(Weak<EventedInner>, Option<ParentData>)>>,
}

/// Cheaply clonable handle to an event bus
///
/// Clones refer to the same registries.
#[derive(Clone)]
pub struct Evented {
    inner: Rc<EventedInner>,
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const u8,
        Rc::as_ptr(b) as *const u8,
    )
}

fn add_listener(event_type: &str, listener: Listener, registry: &Registry) {
    let mut registry = registry.borrow_mut();
    let listeners = registry.entry(event_type.to_string()).or_default();
    if !listeners.iter().any(|existing| same_listener(existing, &listener)) {
        listeners.push(listener);
    }
}

fn remove_listener(event_type: &str, listener: &Listener, registry: &Registry) {
    if let Some(listeners) = registry.borrow_mut().get_mut(event_type) {
        listeners.retain(|existing| !same_listener(existing, listener));
    }
}

fn snapshot(event_type: &str, registry: &Registry) -> Vec<Listener> {
    registry
        .borrow()
        .get(event_type)
        .cloned()
        .unwrap_or_default()
}

fn has_listeners(event_type: &str, registry: &Registry) -> bool {
    registry
        .borrow()
        .get(event_type)
        .map_or(false, |listeners| !listeners.is_empty())
}

impl Evented {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(EventedInner {
                target: EventTarget(NEXT_TARGET.fetch_add(1, Ordering::Relaxed)),
                listeners: RefCell::default(),
                one_time_listeners: RefCell::default(),
                parent: RefCell::new(None),
            }),
        }
    }

    /// Identity stamped on events as their target
    pub fn target(&self) -> EventTarget {
        self.inner.target
    }

    /// Registers `listener` for `event_type`. Registering the same pair twice is a no-op.
    pub fn on(&self, event_type: &str, listener: Listener) -> &Self {
        add_listener(event_type, listener, &self.inner.listeners);
        self
    }

    /// Removes `listener` from both the persistent and one-time registries
    pub fn off(&self, event_type: &str, listener: &Listener) -> &Self {
        remove_listener(event_type, listener, &self.inner.listeners);
        remove_listener(event_type, listener, &self.inner.one_time_listeners);
        self
    }

    /// Registers `listener` for the next `event_type` only
    pub fn once(&self, event_type: &str, listener: Listener) -> &Self {
        add_listener(event_type, listener, &self.inner.one_time_listeners);
        self
    }

    /// Dispatches `event` to this bus and then to its parents
    pub fn fire(&self, mut event: Event) -> &Self {
        let event_type = event.event_type().to_string();

        if self.listens(&event_type) {
            event.set_target(self.target());

            // Snapshots keep registry changes made by listeners out of this dispatch
            for listener in snapshot(&event_type, &self.inner.listeners) {
                listener(&event);
            }

            for listener in snapshot(&event_type, &self.inner.one_time_listeners) {
                remove_listener(&event_type, &listener, &self.inner.one_time_listeners);
                listener(&event);
            }

            if let Some((parent, data)) = self.parent() {
                if let Some(data) = data {
                    event.merge(&data.resolve());
                }
                parent.fire(event);
            }
        } else if let Some(error) = event.error_source() {
            log::error!("unhandled error event: {}", error);
        }

        self
    }

    /// Whether this bus or any ancestor has a listener for `event_type`
    pub fn listens(&self, event_type: &str) -> bool {
        has_listeners(event_type, &self.inner.listeners)
            || has_listeners(event_type, &self.inner.one_time_listeners)
            || self
                .parent()
                .map_or(false, |(parent, _)| parent.listens(event_type))
    }

    /// Forwards every fired event to `parent`, merging `data` first.
    /// The parent is held weakly.
    pub fn set_evented_parent(&self, parent: Option<&Evented>, data: Option<ParentData>) -> &Self {
        *self.inner.parent.borrow_mut() =
            parent.map(|parent| (Rc::downgrade(&parent.inner), data));
        self
    }

    fn parent(&self) -> Option<(Evented, Option<ParentData>)> {
        let parent = self.inner.parent.borrow();
        let (weak, data) = parent.as_ref()?;
        weak.upgrade()
            .map(|inner| (Evented { inner }, data.clone()))
    }
}

impl Default for Evented {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability of owning an event bus, exposed by delegation
pub trait EventSource {
    fn events(&self) -> &Evented;

    fn on(&self, event_type: &str, listener: Listener) -> &Self {
        self.events().on(event_type, listener);
        self
    }

    fn off(&self, event_type: &str, listener: &Listener) -> &Self {
        self.events().off(event_type, listener);
        self
    }

    fn once(&self, event_type: &str, listener: Listener) -> &Self {
        self.events().once(event_type, listener);
        self
    }

    fn fire(&self, event: Event) -> &Self {
        self.events().fire(event);
        self
    }

    fn listens(&self, event_type: &str) -> bool {
        self.events().listens(event_type)
    }
}

impl EventSource for Evented {
    fn events(&self) -> &Evented {
        self
    }
}
