use crate::core::geo::{LatLng, Point};
use crate::events::{names, Event, EventData};
use crate::traits::ViewTransform;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;

/// Raw device input, in viewport pixels, as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    MouseDown {
        position: Point,
        button: MouseButton,
        modifiers: KeyModifiers,
    },
    MouseUp {
        position: Point,
        button: MouseButton,
        modifiers: KeyModifiers,
    },
    MouseMove {
        position: Point,
        modifiers: KeyModifiers,
    },
    /// Single click/tap
    Click {
        position: Point,
        button: MouseButton,
        modifiers: KeyModifiers,
    },
    /// Double click/tap
    DoubleClick {
        position: Point,
        modifiers: KeyModifiers,
    },
    ContextMenu { position: Point },
    /// Scroll wheel; positive `delta_y` scrolls down
    Wheel {
        position: Point,
        delta_y: f64,
        delta_mode: WheelDeltaMode,
        modifiers: KeyModifiers,
    },
    /// Touch events (multi-touch)
    Touch {
        event_type: TouchEventType,
        /// Contacts still on the surface
        touches: Vec<TouchPoint>,
        /// Contacts that changed in this event
        changed_touches: Vec<TouchPoint>,
    },
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
    pub pressure: f32,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self {
            id,
            position,
            pressure: 1.0,
        }
    }
}

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
}

/// Pixels scrolled per wheel line
pub const WHEEL_LINE_HEIGHT: f64 = 40.0;

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Whether an input produced a default camera behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl InputEvent {
    /// Name under which the map-relative event is fired
    pub fn event_type(&self) -> &'static str {
        match self {
            InputEvent::MouseDown { .. } => names::MOUSE_DOWN,
            InputEvent::MouseUp { .. } => names::MOUSE_UP,
            InputEvent::MouseMove { .. } => names::MOUSE_MOVE,
            InputEvent::Click { .. } => names::CLICK,
            InputEvent::DoubleClick { .. } => names::DOUBLE_CLICK,
            InputEvent::ContextMenu { .. } => names::CONTEXT_MENU,
            InputEvent::Wheel { .. } => names::WHEEL,
            InputEvent::Touch { event_type, .. } => match event_type {
                TouchEventType::Start => names::TOUCH_START,
                TouchEventType::Move => names::TOUCH_MOVE,
                TouchEventType::End => names::TOUCH_END,
                TouchEventType::Cancel => names::TOUCH_CANCEL,
            },
        }
    }

    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::MouseDown { position, .. }
            | InputEvent::MouseUp { position, .. }
            | InputEvent::MouseMove { position, .. }
            | InputEvent::Click { position, .. }
            | InputEvent::DoubleClick { position, .. }
            | InputEvent::ContextMenu { position }
            | InputEvent::Wheel { position, .. } => Some(*position),
            InputEvent::Touch { touches, .. } => touches.first().map(|t| t.position),
        }
    }

    pub fn modifiers(&self) -> KeyModifiers {
        match self {
            InputEvent::MouseDown { modifiers, .. }
            | InputEvent::MouseUp { modifiers, .. }
            | InputEvent::MouseMove { modifiers, .. }
            | InputEvent::Click { modifiers, .. }
            | InputEvent::DoubleClick { modifiers, .. }
            | InputEvent::Wheel { modifiers, .. } => *modifiers,
            InputEvent::ContextMenu { .. } | InputEvent::Touch { .. } => KeyModifiers::default(),
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        !self.is_touch_event()
    }

    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }

    /// The raw event as it appears under `original_event` in fired payloads
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn point_value(point: &Point) -> Value {
    json!({ "x": point.x, "y": point.y })
}

fn lat_lng_value(lat_lng: &LatLng) -> Value {
    json!({ "lat": lat_lng.lat, "lng": lat_lng.lng })
}

fn unsupported(kind: &str, input: &InputEvent) -> MapError {
    MapError::UnsupportedInput(format!(
        "{} cannot be built from a '{}' input",
        kind,
        input.event_type()
    ))
}

/// A mouse event located on the map
#[derive(Debug, Clone)]
pub struct MapMouseEvent {
    event_type: &'static str,
    /// Viewport pixel of the pointer
    pub point: Point,
    /// Location under the pointer
    pub lng_lat: LatLng,
    pub original_event: InputEvent,
    default_prevented: Rc<Cell<bool>>,
}

impl MapMouseEvent {
    pub fn new<T>(transform: &T, input: &InputEvent) -> Result<Self>
    where
        T: ViewTransform + ?Sized,
    {
        let point = match input {
            InputEvent::Wheel { .. } | InputEvent::Touch { .. } => {
                return Err(unsupported("MapMouseEvent", input))
            }
            other => other.position().ok_or_else(|| unsupported("MapMouseEvent", other))?,
        };

        Ok(Self {
            event_type: input.event_type(),
            point,
            lng_lat: transform.point_location(&point),
            original_event: input.clone(),
            default_prevented: Rc::new(Cell::new(false)),
        })
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    /// Stops handlers from applying their default behavior to this event
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// The bus event for this input. Calling `prevent_default` on it (or on
    /// any clone) is visible here.
    pub fn to_event(&self, extra: &EventData) -> Event {
        Event::new(self.event_type)
            .with_value("point", point_value(&self.point))
            .with_value("lng_lat", lat_lng_value(&self.lng_lat))
            .with_value("original_event", self.original_event.to_value())
            .with_data(extra)
            .share_default_prevented(self.default_prevented.clone())
    }
}

/// A touch event located on the map
///
/// `point` and `lng_lat` are the centroid of the contacts. For `touchend`
/// and `touchcancel` the contacts are the ones that were lifted.
#[derive(Debug, Clone)]
pub struct MapTouchEvent {
    event_type: &'static str,
    pub point: Point,
    pub lng_lat: LatLng,
    pub points: Vec<Point>,
    pub lng_lats: Vec<LatLng>,
    pub original_event: InputEvent,
    default_prevented: Rc<Cell<bool>>,
}

impl MapTouchEvent {
    pub fn new<T>(transform: &T, input: &InputEvent) -> Result<Self>
    where
        T: ViewTransform + ?Sized,
    {
        let InputEvent::Touch {
            event_type,
            touches,
            changed_touches,
        } = input
        else {
            return Err(unsupported("MapTouchEvent", input));
        };

        let contacts = match event_type {
            TouchEventType::End | TouchEventType::Cancel => changed_touches,
            TouchEventType::Start | TouchEventType::Move => touches,
        };
        let points: Vec<Point> = contacts.iter().map(|touch| touch.position).collect();
        let lng_lats = points
            .iter()
            .map(|point| transform.point_location(point))
            .collect();
        let point = Point::centroid(&points).unwrap_or_default();

        Ok(Self {
            event_type: input.event_type(),
            point,
            lng_lat: transform.point_location(&point),
            points,
            lng_lats,
            original_event: input.clone(),
            default_prevented: Rc::new(Cell::new(false)),
        })
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn to_event(&self, extra: &EventData) -> Event {
        Event::new(self.event_type)
            .with_value("point", point_value(&self.point))
            .with_value("lng_lat", lat_lng_value(&self.lng_lat))
            .with_value(
                "points",
                Value::Array(self.points.iter().map(point_value).collect()),
            )
            .with_value(
                "lng_lats",
                Value::Array(self.lng_lats.iter().map(lat_lng_value).collect()),
            )
            .with_value("original_event", self.original_event.to_value())
            .with_data(extra)
            .share_default_prevented(self.default_prevented.clone())
    }
}

/// A wheel event located on the map
#[derive(Debug, Clone)]
pub struct MapWheelEvent {
    pub point: Point,
    pub lng_lat: LatLng,
    pub original_event: InputEvent,
    default_prevented: Rc<Cell<bool>>,
}

impl MapWheelEvent {
    pub fn new<T>(transform: &T, input: &InputEvent) -> Result<Self>
    where
        T: ViewTransform + ?Sized,
    {
        let InputEvent::Wheel { position, .. } = input else {
            return Err(unsupported("MapWheelEvent", input));
        };

        Ok(Self {
            point: *position,
            lng_lat: transform.point_location(position),
            original_event: input.clone(),
            default_prevented: Rc::new(Cell::new(false)),
        })
    }

    /// Scroll amount in pixels, positive when scrolling up (zooming in)
    pub fn delta(&self) -> f64 {
        match self.original_event {
            InputEvent::Wheel {
                delta_y,
                delta_mode: WheelDeltaMode::Line,
                ..
            } => -delta_y * WHEEL_LINE_HEIGHT,
            InputEvent::Wheel { delta_y, .. } => -delta_y,
            _ => 0.0,
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn to_event(&self, extra: &EventData) -> Event {
        Event::new(names::WHEEL)
            .with_value("point", point_value(&self.point))
            .with_value("lng_lat", lat_lng_value(&self.lng_lat))
            .with_value("delta", json!(self.delta()))
            .with_value("original_event", self.original_event.to_value())
            .with_data(extra)
            .share_default_prevented(self.default_prevented.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(400.0, 300.0))
    }

    fn click_at(x: f64, y: f64) -> InputEvent {
        InputEvent::Click {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: KeyModifiers::default(),
        }
    }

    #[test]
    fn test_mouse_event_at_center_is_map_center() {
        let event = MapMouseEvent::new(&viewport(), &click_at(200.0, 150.0)).unwrap();
        assert_eq!(event.event_type(), "click");
        assert!(event.lng_lat.lat.abs() < 1e-9);
        assert!(event.lng_lat.lng.abs() < 1e-9);
    }

    #[test]
    fn test_mouse_event_rejects_touch_input() {
        let touch = InputEvent::Touch {
            event_type: TouchEventType::Start,
            touches: vec![TouchPoint::new(1, Point::new(10.0, 10.0))],
            changed_touches: vec![],
        };
        let err = MapMouseEvent::new(&viewport(), &touch).unwrap_err();
        assert!(matches!(err, MapError::UnsupportedInput(_)));
    }

    #[test]
    fn test_touch_event_centroid() {
        let touch = InputEvent::Touch {
            event_type: TouchEventType::Move,
            touches: vec![
                TouchPoint::new(1, Point::new(100.0, 100.0)),
                TouchPoint::new(2, Point::new(300.0, 200.0)),
            ],
            changed_touches: vec![TouchPoint::new(2, Point::new(300.0, 200.0))],
        };
        let event = MapTouchEvent::new(&viewport(), &touch).unwrap();
        assert_eq!(event.point, Point::new(200.0, 150.0));
        assert_eq!(event.points.len(), 2);
        assert_eq!(event.lng_lats.len(), 2);
        assert_eq!(event.event_type(), "touchmove");
    }

    #[test]
    fn test_touch_end_uses_changed_touches() {
        let touch = InputEvent::Touch {
            event_type: TouchEventType::End,
            touches: vec![],
            changed_touches: vec![TouchPoint::new(4, Point::new(50.0, 60.0))],
        };
        let event = MapTouchEvent::new(&viewport(), &touch).unwrap();
        assert_eq!(event.points, vec![Point::new(50.0, 60.0)]);
        assert_eq!(event.point, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_wheel_delta_units() {
        let wheel = InputEvent::Wheel {
            position: Point::new(0.0, 0.0),
            delta_y: 3.0,
            delta_mode: WheelDeltaMode::Line,
            modifiers: KeyModifiers::default(),
        };
        let event = MapWheelEvent::new(&viewport(), &wheel).unwrap();
        assert_eq!(event.delta(), -120.0);
    }

    #[test]
    fn test_prevent_default_through_fired_event() {
        let mouse = MapMouseEvent::new(&viewport(), &click_at(10.0, 20.0)).unwrap();
        let event = mouse.to_event(&EventData::new());
        assert_eq!(event.get("point"), Some(&json!({ "x": 10.0, "y": 20.0 })));
        assert!(event.get("original_event").is_some());

        event.prevent_default();
        assert!(mouse.default_prevented());
    }
}
