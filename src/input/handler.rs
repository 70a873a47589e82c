use crate::animation::EasingFunction;
use crate::camera::{AnimationOptions, Camera, CameraOptions, EaseToOptions};
use crate::core::config::InteractionConfig;
use crate::core::geo::{LatLng, Point};
use crate::events::{names, Event, EventData, EventSource};
use crate::input::events::{
    EventHandled, InputEvent, MapMouseEvent, MapTouchEvent, MapWheelEvent, MouseButton,
    TouchEventType,
};
use crate::traits::ViewTransform;
use crate::Result;
use std::collections::VecDeque;
use std::rc::Rc;

/// Timing curve of wheel zooms: fast start, gentle stop
const WHEEL_EASING: EasingFunction = EasingFunction::CubicBezier(0.0, 0.0, 0.25, 1.0);

/// A pan gesture in progress, by mouse or by a single finger
#[derive(Debug, Clone, Copy)]
struct PanGesture {
    last: Point,
    /// Set once the first move fired `dragstart`
    active: bool,
}

/// Turns raw device input into map events and default camera behavior
///
/// Every input is first fired on the camera's bus as a [`MapMouseEvent`],
/// [`MapTouchEvent`] or [`MapWheelEvent`]. If no listener called
/// `prevent_default`, the enabled default behavior is applied: drag to pan,
/// double-click to zoom, wheel to zoom and single-finger touch pan.
pub struct InputHandler<T: ViewTransform + 'static> {
    pub enabled: bool,
    camera: Rc<Camera<T>>,
    event_queue: VecDeque<InputEvent>,
    pan: Option<PanGesture>,
}

impl<T: ViewTransform + 'static> InputHandler<T> {
    pub fn new(camera: Rc<Camera<T>>) -> Self {
        Self {
            enabled: true,
            camera,
            event_queue: VecDeque::new(),
            pan: None,
        }
    }

    pub fn camera(&self) -> &Rc<Camera<T>> {
        &self.camera
    }

    /// Whether a pan gesture has started moving the map
    pub fn is_panning(&self) -> bool {
        self.pan.map_or(false, |pan| pan.active)
    }

    /// Fires `input` as a map event and applies its default behavior
    pub fn handle_event(&mut self, input: InputEvent) -> Result<EventHandled> {
        if !self.enabled {
            return Ok(self.release_gesture(&input));
        }
        let interaction = self.camera.config().interaction.clone();

        match &input {
            InputEvent::Wheel { .. } => {
                let wheel = MapWheelEvent::new(&*self.camera.transform(), &input)?;
                self.camera.fire(wheel.to_event(&EventData::new()));
                if wheel.default_prevented() || !interaction.scroll_zoom {
                    return Ok(EventHandled::NotHandled);
                }
                self.scroll_zoom(&wheel, &interaction);
                Ok(EventHandled::Handled)
            }
            InputEvent::Touch { event_type, .. } => {
                let touch = MapTouchEvent::new(&*self.camera.transform(), &input)?;
                self.camera.fire(touch.to_event(&EventData::new()));
                if touch.default_prevented() || !interaction.touch_pan {
                    return Ok(self.release_gesture(&input));
                }
                Ok(self.touch_pan(*event_type, &touch))
            }
            _ => {
                let mouse = MapMouseEvent::new(&*self.camera.transform(), &input)?;
                self.camera.fire(mouse.to_event(&EventData::new()));
                if mouse.default_prevented() {
                    return Ok(self.release_gesture(&input));
                }
                Ok(self.mouse_default(&mouse, &interaction))
            }
        }
    }

    /// Queue an event for later processing
    pub fn queue_event(&mut self, event: InputEvent) {
        self.event_queue.push_back(event);
    }

    /// Handles every queued event in order. Stops at the first event that
    /// cannot be interpreted, leaving the rest queued.
    pub fn process_queued_events(&mut self) -> Result<Vec<EventHandled>> {
        let mut handled = Vec::with_capacity(self.event_queue.len());
        while let Some(event) = self.event_queue.pop_front() {
            handled.push(self.handle_event(event)?);
        }
        Ok(handled)
    }

    /// Clear the event queue
    pub fn clear_queue(&mut self) {
        self.event_queue.clear();
    }

    fn mouse_default(
        &mut self,
        mouse: &MapMouseEvent,
        interaction: &InteractionConfig,
    ) -> EventHandled {
        match &mouse.original_event {
            InputEvent::MouseDown {
                button: MouseButton::Left,
                ..
            } if interaction.drag_pan => {
                self.pan = Some(PanGesture {
                    last: mouse.point,
                    active: false,
                });
                EventHandled::Handled
            }
            InputEvent::MouseMove { .. } if self.pan.is_some() => {
                self.pan_move(mouse.point, &mouse.original_event);
                EventHandled::Handled
            }
            InputEvent::MouseUp { .. } if self.pan.is_some() => {
                self.pan_end(&mouse.original_event);
                EventHandled::Handled
            }
            InputEvent::DoubleClick { modifiers, .. } if interaction.double_click_zoom => {
                let delta = if modifiers.shift { -1.0 } else { 1.0 };
                self.zoom_around(
                    self.camera.zoom() + delta,
                    mouse.lng_lat,
                    interaction.double_click_zoom_duration_ms,
                    EasingFunction::Ease,
                    &mouse.original_event,
                );
                EventHandled::Handled
            }
            _ => EventHandled::NotHandled,
        }
    }

    fn touch_pan(&mut self, event_type: TouchEventType, touch: &MapTouchEvent) -> EventHandled {
        match event_type {
            TouchEventType::Start if touch.points.len() == 1 => {
                self.pan = Some(PanGesture {
                    last: touch.point,
                    active: false,
                });
                EventHandled::Handled
            }
            // A second finger ends the single-finger pan
            TouchEventType::Start => {
                if self.pan.is_some() {
                    self.pan_end(&touch.original_event);
                }
                EventHandled::NotHandled
            }
            TouchEventType::Move if self.pan.is_some() && touch.points.len() == 1 => {
                self.pan_move(touch.point, &touch.original_event);
                EventHandled::Handled
            }
            TouchEventType::End | TouchEventType::Cancel if self.pan.is_some() => {
                self.pan_end(&touch.original_event);
                EventHandled::Handled
            }
            _ => EventHandled::NotHandled,
        }
    }

    fn pan_move(&mut self, point: Point, original: &InputEvent) {
        let Some(mut pan) = self.pan else {
            return;
        };
        let data = original_event_data(original);

        if !pan.active {
            self.camera.stop();
            pan.active = true;
            self.camera.set_gesture_moving(true);
            self.camera.fire(Event::new(names::DRAG_START).with_data(&data));
            self.camera.fire(Event::new(names::MOVE_START).with_data(&data));
        }

        {
            let mut transform = self.camera.transform_mut();
            let grabbed = transform.point_location(&pan.last);
            transform.set_location_at_point(&grabbed, &point);
        }
        pan.last = point;
        self.pan = Some(pan);

        self.camera.fire(Event::new(names::DRAG).with_data(&data));
        self.camera.fire(Event::new(names::MOVE).with_data(&data));
    }

    /// A lifted button or finger always ends the pan it belongs to, even
    /// when its default is prevented or the handler is disabled, so every
    /// `movestart` of a drag gets its `moveend`.
    fn release_gesture(&mut self, input: &InputEvent) -> EventHandled {
        let released = match input {
            InputEvent::MouseUp { .. } => true,
            InputEvent::Touch { event_type, .. } => {
                matches!(event_type, TouchEventType::End | TouchEventType::Cancel)
            }
            _ => false,
        };
        if released && self.pan_end(input) {
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }

    /// Returns whether a started drag was ended
    fn pan_end(&mut self, original: &InputEvent) -> bool {
        let Some(pan) = self.pan.take() else {
            return false;
        };
        if !pan.active {
            return false;
        }
        let data = original_event_data(original);
        self.camera.set_gesture_moving(false);
        self.camera.fire(Event::new(names::DRAG_END).with_data(&data));
        self.camera.fire(Event::new(names::MOVE_END).with_data(&data));
        true
    }

    /// Zoom by `2 / (1 + e^(-|d|/100))`, inverted for negative deltas, so
    /// small scrolls zoom gently and large ones saturate at a factor of two
    fn scroll_zoom(&mut self, wheel: &MapWheelEvent, interaction: &InteractionConfig) {
        let delta = wheel.delta();
        if delta == 0.0 {
            return;
        }
        let mut scale = 2.0 / (1.0 + (-(delta / 100.0).abs()).exp());
        if delta < 0.0 && scale != 0.0 {
            scale = 1.0 / scale;
        }

        let target = {
            let transform = self.camera.transform();
            transform.scale_zoom(transform.scale() * scale)
        };
        self.zoom_around(
            target,
            wheel.lng_lat,
            interaction.wheel_zoom_duration_ms,
            WHEEL_EASING,
            &wheel.original_event,
        );
    }

    fn zoom_around(
        &self,
        zoom: f64,
        around: LatLng,
        duration_ms: f64,
        easing: EasingFunction,
        original: &InputEvent,
    ) {
        let options = EaseToOptions::new(CameraOptions::new().with_zoom(zoom).with_around(around))
            .with_animation(
                AnimationOptions::new()
                    .with_duration(duration_ms)
                    .with_easing(easing),
            );
        self.camera
            .ease_to(options, Some(original_event_data(original)));
    }
}

fn original_event_data(original: &InputEvent) -> EventData {
    let mut data = EventData::new();
    data.insert("original_event".to_string(), original.to_value());
    data
}
