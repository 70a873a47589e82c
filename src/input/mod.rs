pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{
    EventHandled, InputEvent, KeyModifiers, MapMouseEvent, MapTouchEvent, MapWheelEvent,
    MouseButton, TouchEventType, TouchPoint, WheelDeltaMode,
};
pub use handler::InputHandler;
