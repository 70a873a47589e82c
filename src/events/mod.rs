pub mod event;
pub mod evented;

pub use event::{Event, EventData, EventTarget};
pub use evented::{listener, EventSource, Evented, Listener, ParentData};

/// Event names fired by the camera and the input handler
pub mod names {
    pub const MOVE_START: &str = "movestart";
    pub const MOVE: &str = "move";
    pub const MOVE_END: &str = "moveend";

    pub const ZOOM_START: &str = "zoomstart";
    pub const ZOOM: &str = "zoom";
    pub const ZOOM_END: &str = "zoomend";

    pub const ROTATE_START: &str = "rotatestart";
    pub const ROTATE: &str = "rotate";
    pub const ROTATE_END: &str = "rotateend";

    pub const PITCH_START: &str = "pitchstart";
    pub const PITCH: &str = "pitch";
    pub const PITCH_END: &str = "pitchend";

    pub const DRAG_START: &str = "dragstart";
    pub const DRAG: &str = "drag";
    pub const DRAG_END: &str = "dragend";

    pub const MOUSE_DOWN: &str = "mousedown";
    pub const MOUSE_UP: &str = "mouseup";
    pub const MOUSE_MOVE: &str = "mousemove";
    pub const CLICK: &str = "click";
    pub const DOUBLE_CLICK: &str = "dblclick";
    pub const CONTEXT_MENU: &str = "contextmenu";
    pub const WHEEL: &str = "wheel";

    pub const TOUCH_START: &str = "touchstart";
    pub const TOUCH_MOVE: &str = "touchmove";
    pub const TOUCH_END: &str = "touchend";
    pub const TOUCH_CANCEL: &str = "touchcancel";

    pub const ERROR: &str = "error";
}
