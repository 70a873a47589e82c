use serde_json::Value;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Free-form event payload
pub type EventData = serde_json::Map<String, Value>;

/// Identity of the [`Evented`](super::Evented) that is dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTarget(pub(crate) u64);

/// A named notification with a merged payload
///
/// Clones share the cancellation flag, so `prevent_default` on any clone is
/// visible to whoever fired the event.
#[derive(Clone)]
pub struct Event {
    event_type: String,
    target: Option<EventTarget>,
    data: EventData,
    error: Option<Rc<dyn std::error::Error>>,
    default_prevented: Rc<Cell<bool>>,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            data: EventData::new(),
            error: None,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    /// An `error` event carrying `error`. Dispatching it with nobody
    /// listening logs the error instead of dropping it.
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let mut event = Self::new(super::names::ERROR);
        event
            .data
            .insert("error".to_string(), Value::String(error.to_string()));
        event.error = Some(Rc::new(error));
        event
    }

    /// Merges `data` into the payload, overwriting existing keys
    pub fn with_data(mut self, data: &EventData) -> Self {
        self.merge(data);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub(crate) fn merge(&mut self, data: &EventData) {
        for (key, value) in data {
            self.data.insert(key.clone(), value.clone());
        }
    }

    pub(crate) fn set_target(&mut self, target: EventTarget) {
        self.target = Some(target);
    }

    pub(crate) fn share_default_prevented(mut self, flag: Rc<Cell<bool>>) -> Self {
        self.default_prevented = flag;
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The bus currently dispatching this event, `None` before it is fired
    pub fn target(&self) -> Option<EventTarget> {
        self.target
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn error_source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("target", &self.target)
            .field("data", &self.data)
            .field("is_error", &self.is_error())
            .field("default_prevented", &self.default_prevented())
            .finish()
    }
}
