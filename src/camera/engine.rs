//! The camera: immediate and animated view changes over a [`ViewTransform`]
//!
//! All operations take `&self` so that listeners, which receive the event
//! but may also hold an `Rc<Camera>`, can call back into the camera while it
//! is dispatching. No `RefCell` borrow of the transform or the session is
//! held across a `fire`.

use crate::animation::EasingFunction;
use crate::camera::bounds::camera_for_bounds;
use crate::camera::flight::{curve_for_max_span, FlightPath};
use crate::camera::options::{
    AnimationOptions, BoundsCamera, CameraOptions, EaseToOptions, FitBoundsOptions, FlyToOptions,
};
use crate::camera::session::{Axes, EasePath, EaseSession, Phase, Span};
use crate::core::config::{CameraConfig, MotionProfile};
use crate::core::constants::FLIGHT_EPSILON;
use crate::core::geo::{wrap, LatLng, LatLngBounds, Point};
use crate::events::{names, Event, EventData, EventSource, Evented};
use crate::traits::{Clock, FrameScheduler, ViewTransform};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// Picks among `bearing`, `bearing - 360` and `bearing + 360` the value
/// closest to `current`, after wrapping `bearing` into `[-180, 180)`.
pub fn normalize_bearing(bearing: f64, current: f64) -> f64 {
    let bearing = wrap(bearing, -180.0, 180.0);
    [bearing - 360.0, bearing + 360.0]
        .into_iter()
        .fold(bearing, |best, candidate| {
            if (candidate - current).abs() < (best - current).abs() {
                candidate
            } else {
                best
            }
        })
}

/// Moves `center` to the copy of the world nearest the current center, so a
/// pan never goes the long way around. Only when longitudes wrap freely.
fn normalize_center<T>(transform: &T, mut center: LatLng) -> LatLng
where
    T: ViewTransform + ?Sized,
{
    if !transform.render_world_copies() || transform.lng_range().is_some() {
        return center;
    }
    let delta = center.lng - transform.center().lng;
    if delta > 180.0 {
        center.lng -= 360.0;
    } else if delta < -180.0 {
        center.lng += 360.0;
    }
    center
}

/// Animated controller of a map view
pub struct Camera<T: ViewTransform + 'static> {
    transform: RefCell<T>,
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    events: Evented,
    config: RefCell<CameraConfig>,
    /// Held by the active animation session
    moving: Cell<bool>,
    /// Held by a user gesture, independently of any animation
    gesture_moving: Cell<bool>,
    session: RefCell<Option<EaseSession>>,
    next_session_id: Cell<u64>,
    self_ref: Weak<Camera<T>>,
}

impl<T: ViewTransform + 'static> Camera<T> {
    pub fn new(
        transform: T,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
        config: CameraConfig,
    ) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            transform: RefCell::new(transform),
            scheduler,
            clock,
            events: Evented::new(),
            config: RefCell::new(config),
            moving: Cell::new(false),
            gesture_moving: Cell::new(false),
            session: RefCell::new(None),
            next_session_id: Cell::new(1),
            self_ref: self_ref.clone(),
        })
    }

    /// Read access to the transform. Do not hold it across camera calls.
    pub fn transform(&self) -> Ref<'_, T> {
        self.transform.borrow()
    }

    /// Write access for host-owned state such as the viewport size.
    /// Camera state should go through `jump_to` so listeners are told.
    pub fn transform_mut(&self) -> RefMut<'_, T> {
        self.transform.borrow_mut()
    }

    pub fn config(&self) -> Ref<'_, CameraConfig> {
        self.config.borrow()
    }

    pub fn set_config(&self, config: CameraConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn set_motion_profile(&self, profile: MotionProfile) {
        self.set_config(profile.resolve());
    }

    pub fn center(&self) -> LatLng {
        self.transform.borrow().center()
    }

    pub fn zoom(&self) -> f64 {
        self.transform.borrow().zoom()
    }

    pub fn bearing(&self) -> f64 {
        self.transform.borrow().bearing()
    }

    pub fn pitch(&self) -> f64 {
        self.transform.borrow().pitch()
    }

    pub fn min_zoom(&self) -> f64 {
        self.transform.borrow().min_zoom()
    }

    pub fn max_zoom(&self) -> f64 {
        self.transform.borrow().max_zoom()
    }

    /// Viewport pixel of a geographic location
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        self.transform.borrow().location_point(lat_lng)
    }

    /// Geographic location under a viewport pixel
    pub fn unproject(&self, point: &Point) -> LatLng {
        self.transform.borrow().point_location(point)
    }

    /// Whether an animation is interpolating. False while end events are
    /// being held back by `delay_end_events`.
    pub fn is_easing(&self) -> bool {
        self.session
            .borrow()
            .as_ref()
            .map_or(false, EaseSession::is_animating)
    }

    /// Whether the camera is between `movestart` and `moveend`, either
    /// animating or being dragged by a gesture
    pub fn is_moving(&self) -> bool {
        self.moving.get() || self.gesture_moving.get()
    }

    pub fn is_zooming(&self) -> bool {
        self.active_axes().zooming
    }

    pub fn is_rotating(&self) -> bool {
        self.active_axes().rotating
    }

    pub fn is_pitching(&self) -> bool {
        self.active_axes().pitching
    }

    fn active_axes(&self) -> Axes {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.axes)
            .unwrap_or_default()
    }

    /// Marks a gesture as moving the camera. Animations ending meanwhile
    /// leave this untouched.
    pub(crate) fn set_gesture_moving(&self, moving: bool) {
        self.gesture_moving.set(moving);
    }

    /// Changes any combination of center, zoom, bearing and pitch at once,
    /// without animation.
    ///
    /// Always fires `movestart`, `move` and `moveend`; each axis whose value
    /// actually changed also fires its start/update/end triple between
    /// `move` and `moveend`.
    pub fn jump_to(&self, options: CameraOptions, event_data: Option<EventData>) -> &Self {
        self.stop();
        let event_data = event_data.unwrap_or_default();

        let changed = {
            let mut transform = self.transform.borrow_mut();
            let mut changed = Axes::default();

            if let Some(zoom) = options.zoom {
                if transform.zoom() != zoom {
                    changed.zooming = true;
                    transform.set_zoom(zoom);
                }
            }
            if let Some(center) = options.center {
                transform.set_center(center);
            }
            if let Some(bearing) = options.bearing {
                if transform.bearing() != bearing {
                    changed.rotating = true;
                    transform.set_bearing(bearing);
                }
            }
            if let Some(pitch) = options.pitch {
                if transform.pitch() != pitch {
                    changed.pitching = true;
                    transform.set_pitch(pitch);
                }
            }
            changed
        };

        self.fire_named(names::MOVE_START, &event_data);
        self.fire_named(names::MOVE, &event_data);

        let triples = [
            (changed.zooming, [names::ZOOM_START, names::ZOOM, names::ZOOM_END]),
            (changed.rotating, [names::ROTATE_START, names::ROTATE, names::ROTATE_END]),
            (changed.pitching, [names::PITCH_START, names::PITCH, names::PITCH_END]),
        ];
        for (_, triple) in triples.iter().filter(|(changed, _)| *changed) {
            for name in triple {
                self.fire_named(name, &event_data);
            }
        }

        self.fire_named(names::MOVE_END, &event_data);
        self
    }

    pub fn set_center(&self, center: LatLng, event_data: Option<EventData>) -> &Self {
        self.jump_to(CameraOptions::new().with_center(center), event_data)
    }

    pub fn set_zoom(&self, zoom: f64, event_data: Option<EventData>) -> &Self {
        self.jump_to(CameraOptions::new().with_zoom(zoom), event_data)
    }

    pub fn set_bearing(&self, bearing: f64, event_data: Option<EventData>) -> &Self {
        self.jump_to(CameraOptions::new().with_bearing(bearing), event_data)
    }

    pub fn set_pitch(&self, pitch: f64, event_data: Option<EventData>) -> &Self {
        self.jump_to(CameraOptions::new().with_pitch(pitch), event_data)
    }

    /// Animates to the target camera along a straight screen-space path.
    ///
    /// The pan covers its line faster early on when zooming out and slower
    /// early on when zooming in, bounded by a factor of two either way. With
    /// `around` set, that location stays pinned under its current pixel
    /// instead. The target zoom is not clamped here; the transform clamps
    /// each frame.
    pub fn ease_to(
        &self,
        options: impl Into<EaseToOptions>,
        event_data: Option<EventData>,
    ) -> &Self {
        let options = options.into();
        self.stop();

        let (duration, easing) = {
            let config = self.config.borrow();
            (
                self.resolve_duration(&options.animation, config.animation.ease_duration_ms),
                options.animation.easing.unwrap_or(config.animation.easing),
            )
        };

        let (path, axes) = {
            let transform = self.transform.borrow();
            let camera = &options.camera;

            let start_zoom = transform.zoom();
            let start_bearing = transform.bearing();
            let start_pitch = transform.pitch();

            let zoom = Span::new(start_zoom, camera.zoom.unwrap_or(start_zoom));
            let bearing = Span::new(
                start_bearing,
                camera
                    .bearing
                    .map_or(start_bearing, |bearing| normalize_bearing(bearing, start_bearing)),
            );
            let pitch = Span::new(start_pitch, camera.pitch.unwrap_or(start_pitch));

            let point_at_offset = transform.center_point().add(&options.animation.offset);
            let location_at_offset = transform.point_location(&point_at_offset);
            let center =
                normalize_center(&*transform, camera.center.unwrap_or(location_at_offset));
            let from = transform.project(&location_at_offset);
            let delta = transform.project(&center).subtract(&from);

            let around = camera
                .around
                .map(|around| (around, transform.location_point(&around)));

            let path = EasePath::Linear {
                zoom,
                bearing,
                pitch,
                from,
                delta,
                final_scale: transform.zoom_scale(zoom.end - zoom.start),
                point_at_offset,
                around,
            };
            let axes = Axes {
                zooming: zoom.changes(),
                rotating: bearing.changes(),
                pitching: pitch.changes(),
            };
            (path, axes)
        };

        self.ease(path, axes, duration, easing, &options.animation, event_data);
        self
    }

    /// Animates to the target camera along a zoom-out, pan, zoom-in flight
    /// (van Wijk & Nuij), so long pans stay legible.
    ///
    /// The target zoom is clamped to the transform's limits. When there is
    /// nothing to fly (no distance and no zoom change) this becomes an
    /// `ease_to` with the same options.
    pub fn fly_to(&self, options: impl Into<FlyToOptions>, event_data: Option<EventData>) -> &Self {
        let options = options.into();
        self.stop();

        let (defaults, easing) = {
            let config = self.config.borrow();
            (
                config.animation.clone(),
                options.animation.easing.unwrap_or(config.animation.easing),
            )
        };
        let flight = &options.flight;

        let planned = {
            let transform = self.transform.borrow();
            let camera = &options.camera;

            let start_zoom = transform.zoom();
            let start_bearing = transform.bearing();
            let start_pitch = transform.pitch();

            let zoom = Span::new(
                start_zoom,
                camera.zoom.map_or(start_zoom, |zoom| {
                    zoom.clamp(transform.min_zoom(), transform.max_zoom())
                }),
            );
            let bearing = Span::new(
                start_bearing,
                camera
                    .bearing
                    .map_or(start_bearing, |bearing| normalize_bearing(bearing, start_bearing)),
            );
            let pitch = Span::new(start_pitch, camera.pitch.unwrap_or(start_pitch));

            let scale = transform.zoom_scale(zoom.end - zoom.start);
            let point_at_offset = transform.center_point().add(&options.animation.offset);
            let location_at_offset = transform.point_location(&point_at_offset);
            let center =
                normalize_center(&*transform, camera.center.unwrap_or(location_at_offset));
            let from = transform.project(&location_at_offset);
            let delta = transform.project(&center).subtract(&from);

            let w0 = transform.width().max(transform.height());
            let w1 = w0 / scale;
            let u1 = delta.magnitude();

            let mut rho = flight.curve.unwrap_or(defaults.fly_curve);
            if let Some(min_zoom) = flight.min_zoom {
                // Without distance there is no apex to solve for
                if u1 >= FLIGHT_EPSILON {
                    let min_zoom = min_zoom
                        .min(zoom.start)
                        .min(zoom.end)
                        .clamp(transform.min_zoom(), transform.max_zoom());
                    let w_max = w0 / transform.zoom_scale(min_zoom - zoom.start);
                    rho = curve_for_max_span(w_max, u1);
                }
            }

            FlightPath::plan(w0, w1, u1, rho).map(|path| {
                let ease_path = EasePath::Flight {
                    path,
                    zoom,
                    bearing,
                    pitch,
                    center,
                    from,
                    delta,
                    point_at_offset,
                };
                let axes = Axes {
                    zooming: true,
                    rotating: bearing.changes(),
                    pitching: pitch.changes(),
                };
                (ease_path, axes, path.length(), rho)
            })
        };

        let Some((path, axes, length, rho)) = planned else {
            log::debug!("flight has no distance or zoom change, easing instead");
            return self.ease_to(
                EaseToOptions::new(options.camera).with_animation(options.animation),
                event_data,
            );
        };

        let mut duration = match options.animation.duration {
            Some(duration) => duration,
            None => {
                let velocity = match flight.screen_speed {
                    Some(screen_speed) => screen_speed / rho,
                    None => flight.speed.unwrap_or(defaults.fly_speed),
                };
                1000.0 * length / velocity
            }
        };
        if let Some(max_duration) = flight.max_duration {
            if duration > max_duration {
                duration = 0.0;
            }
        }
        let mut animation = options.animation;
        animation.duration = Some(duration);
        let duration = self.resolve_duration(&animation, duration);

        self.ease(path, axes, duration, easing, &animation, event_data);
        self
    }

    /// Center and zoom that fit `bounds` in the viewport, north up, or
    /// `None` (with a warning) when the padding is malformed or too large.
    pub fn camera_for_bounds(
        &self,
        bounds: &LatLngBounds,
        options: &FitBoundsOptions,
    ) -> Option<BoundsCamera> {
        camera_for_bounds(&*self.transform.borrow(), bounds, options)
    }

    /// Moves to fit `bounds`, easing when `options.linear` is set and flying
    /// otherwise. Does nothing when the bounds cannot be fitted.
    pub fn fit_bounds(
        &self,
        bounds: &LatLngBounds,
        options: FitBoundsOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        let Some(fitted) = self.camera_for_bounds(bounds, &options) else {
            return self;
        };

        let animation = options.animation.with_offset(fitted.offset);
        if options.linear {
            self.ease_to(
                EaseToOptions::new(fitted.camera_options()).with_animation(animation),
                event_data,
            )
        } else {
            self.fly_to(
                FlyToOptions::new(fitted.camera_options())
                    .with_animation(animation)
                    .with_flight(options.flight),
                event_data,
            )
        }
    }

    /// Pans by `offset` pixels; positive x moves the view right
    pub fn pan_by(
        &self,
        offset: Point,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        let center = self.center();
        self.pan_to(center, animation.with_offset(offset.multiply(-1.0)), event_data)
    }

    pub fn pan_to(
        &self,
        center: LatLng,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        self.ease_to(
            EaseToOptions::new(CameraOptions::new().with_center(center)).with_animation(animation),
            event_data,
        )
    }

    pub fn zoom_to(
        &self,
        zoom: f64,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        self.ease_to(
            EaseToOptions::new(CameraOptions::new().with_zoom(zoom)).with_animation(animation),
            event_data,
        )
    }

    pub fn zoom_in(&self, animation: AnimationOptions, event_data: Option<EventData>) -> &Self {
        let delta = self.config.borrow().animation.zoom_delta;
        self.zoom_to(self.zoom() + delta, animation, event_data)
    }

    pub fn zoom_out(&self, animation: AnimationOptions, event_data: Option<EventData>) -> &Self {
        let delta = self.config.borrow().animation.zoom_delta;
        self.zoom_to(self.zoom() - delta, animation, event_data)
    }

    pub fn rotate_to(
        &self,
        bearing: f64,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        self.ease_to(
            EaseToOptions::new(CameraOptions::new().with_bearing(bearing))
                .with_animation(animation),
            event_data,
        )
    }

    /// Rotates back to bearing 0, by default over a longer duration than a plain ease
    pub fn reset_north(&self, animation: AnimationOptions, event_data: Option<EventData>) -> &Self {
        let animation = self.with_reset_duration(animation);
        self.rotate_to(0.0, animation, event_data)
    }

    /// Rotates back to bearing 0 and pitch 0
    pub fn reset_north_pitch(
        &self,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        let animation = self.with_reset_duration(animation);
        self.ease_to(
            EaseToOptions::new(CameraOptions::new().with_bearing(0.0).with_pitch(0.0))
                .with_animation(animation),
            event_data,
        )
    }

    /// Resets to north only when the bearing is already within the snap threshold
    pub fn snap_to_north(
        &self,
        animation: AnimationOptions,
        event_data: Option<EventData>,
    ) -> &Self {
        let bearing_snap = self.config.borrow().bearing_snap;
        if self.bearing().abs() < bearing_snap {
            return self.reset_north(animation, event_data);
        }
        self
    }

    fn with_reset_duration(&self, mut animation: AnimationOptions) -> AnimationOptions {
        if animation.duration.is_none() {
            animation.duration = Some(self.config.borrow().animation.reset_north_duration_ms);
        }
        animation
    }

    /// Cancels the running animation, if any, and fires its end events.
    ///
    /// The session is taken out of the camera before any event fires, so an
    /// end listener may start a new animation without it being clobbered or
    /// ended twice. A no-op when nothing is animating.
    pub fn stop(&self) -> &Self {
        let Some(session) = self.session.borrow_mut().take() else {
            return self;
        };
        if let Some(frame) = session.frame {
            self.scheduler.cancel_frame(frame);
        }
        self.finish(session);
        self
    }

    fn resolve_duration(&self, animation: &AnimationOptions, default: f64) -> f64 {
        let reduced_motion = self.config.borrow().animation.reduced_motion;
        if !animation.animate || (reduced_motion && !animation.essential) {
            return 0.0;
        }
        animation.duration.unwrap_or(default).max(0.0)
    }

    /// Installs a new session, fires its start events and runs or schedules
    /// its first frame
    fn ease(
        &self,
        path: EasePath,
        axes: Axes,
        duration: f64,
        easing: EasingFunction,
        animation: &AnimationOptions,
        event_data: Option<EventData>,
    ) {
        let id = self.next_session_id.get();
        self.next_session_id.set(id + 1);
        let event_data = event_data.unwrap_or_default();

        log::debug!(
            "camera animation {} started: {:.0}ms zooming={} rotating={} pitching={}",
            id,
            duration,
            axes.zooming,
            axes.rotating,
            axes.pitching
        );

        *self.session.borrow_mut() = Some(EaseSession {
            id,
            phase: Phase::Animating {
                start: self.clock.now(),
                duration,
                easing,
                path,
            },
            axes,
            event_data: event_data.clone(),
            delay_end_events: animation.delay_end_events,
            frame: None,
        });
        self.moving.set(true);

        if !animation.no_move_start {
            self.fire_named(names::MOVE_START, &event_data);
        }
        if axes.zooming {
            self.fire_named(names::ZOOM_START, &event_data);
        }
        if axes.rotating {
            self.fire_named(names::ROTATE_START, &event_data);
        }
        if axes.pitching {
            self.fire_named(names::PITCH_START, &event_data);
        }

        // A start listener may have stopped or replaced this session
        if !self.is_current(id) {
            return;
        }

        if duration == 0.0 {
            self.step(id, path, axes, 1.0, &event_data);
            if self.is_current(id) {
                self.complete(id);
            }
        } else {
            self.request_frame(id);
        }
    }

    fn is_current(&self, id: u64) -> bool {
        self.session
            .borrow()
            .as_ref()
            .map_or(false, |session| session.id == id)
    }

    fn request_frame(&self, id: u64) {
        let camera = self.self_ref.clone();
        let handle = self.scheduler.request_frame(Box::new(move || {
            if let Some(camera) = camera.upgrade() {
                camera.on_frame(id);
            }
        }));
        if let Some(session) = self.session.borrow_mut().as_mut() {
            if session.id == id {
                session.frame = Some(handle);
            }
        }
    }

    fn on_frame(&self, id: u64) {
        let now = self.clock.now();
        let (phase, axes, event_data) = {
            let mut session = self.session.borrow_mut();
            let Some(session) = session.as_mut().filter(|session| session.id == id) else {
                return;
            };
            session.frame = None;
            (session.phase, session.axes, session.event_data.clone())
        };

        match phase {
            Phase::Animating {
                start,
                duration,
                easing,
                path,
            } => {
                let t = ((now - start) / duration).min(1.0);
                self.step(id, path, axes, easing.apply(t), &event_data);
                if !self.is_current(id) {
                    return;
                }
                if t < 1.0 {
                    self.request_frame(id);
                } else {
                    self.complete(id);
                }
            }
            Phase::Settling { until } => {
                if now >= until {
                    self.stop();
                } else {
                    self.request_frame(id);
                }
            }
        }
    }

    /// Applies progress `k` and fires the update events
    fn step(&self, id: u64, path: EasePath, axes: Axes, k: f64, event_data: &EventData) {
        path.apply(&mut *self.transform.borrow_mut(), axes, k);
        log::trace!("camera animation {} at k={:.3}", id, k);

        self.fire_named(names::MOVE, event_data);
        if axes.zooming {
            self.fire_named(names::ZOOM, event_data);
        }
        if axes.rotating {
            self.fire_named(names::ROTATE, event_data);
        }
        if axes.pitching {
            self.fire_named(names::PITCH, event_data);
        }
    }

    /// Called once the last frame is applied: ends the session now or after its delay
    fn complete(&self, id: u64) {
        let delay = {
            let mut session = self.session.borrow_mut();
            match session.as_mut() {
                Some(session) if session.id == id && session.delay_end_events > 0.0 => {
                    let until = self.clock.now() + session.delay_end_events;
                    session.phase = Phase::Settling { until };
                    Some(session.delay_end_events)
                }
                _ => None,
            }
        };

        match delay {
            Some(delay) => {
                log::debug!("camera animation {} holding end events for {:.0}ms", id, delay);
                self.request_frame(id);
            }
            None => {
                self.stop();
            }
        }
    }

    fn finish(&self, session: EaseSession) {
        self.moving.set(false);
        log::debug!("camera animation {} ended", session.id);

        let EaseSession {
            axes, event_data, ..
        } = session;
        if axes.zooming {
            self.fire_named(names::ZOOM_END, &event_data);
        }
        if axes.rotating {
            self.fire_named(names::ROTATE_END, &event_data);
        }
        if axes.pitching {
            self.fire_named(names::PITCH_END, &event_data);
        }
        self.fire_named(names::MOVE_END, &event_data);
    }

    fn fire_named(&self, event_type: &str, event_data: &EventData) {
        self.events.fire(Event::new(event_type).with_data(event_data));
    }
}

impl<T: ViewTransform + 'static> EventSource for Camera<T> {
    fn events(&self) -> &Evented {
        &self.events
    }
}

impl<T: ViewTransform + 'static> Drop for Camera<T> {
    fn drop(&mut self) {
        if let Some(frame) = self.session.get_mut().as_ref().and_then(|session| session.frame) {
            self.scheduler.cancel_frame(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ManualClock, ManualScheduler};
    use crate::core::viewport::Viewport;
    use crate::events::listener;

    struct Harness {
        camera: Rc<Camera<Viewport>>,
        scheduler: Rc<ManualScheduler>,
        clock: Rc<ManualClock>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Harness {
        fn new() -> Self {
            let scheduler = Rc::new(ManualScheduler::new());
            let clock = Rc::new(ManualClock::new(0.0));
            let viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, Point::new(512.0, 512.0));
            let camera = Camera::new(
                viewport,
                scheduler.clone(),
                clock.clone(),
                CameraConfig::default(),
            );

            let log = Rc::new(RefCell::new(Vec::new()));
            for name in [
                names::MOVE_START,
                names::MOVE,
                names::MOVE_END,
                names::ZOOM_START,
                names::ZOOM,
                names::ZOOM_END,
                names::ROTATE_START,
                names::ROTATE,
                names::ROTATE_END,
            ] {
                let sink = log.clone();
                camera.on(
                    name,
                    listener(move |event| sink.borrow_mut().push(event.event_type().to_string())),
                );
            }

            Self {
                camera,
                scheduler,
                clock,
                log,
            }
        }

        fn run_for(&self, ms: f64, frame_ms: f64) {
            let mut elapsed = 0.0;
            while elapsed < ms {
                self.clock.advance(frame_ms);
                self.scheduler.run_frame();
                elapsed += frame_ms;
            }
        }

        fn events(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    #[test]
    fn test_normalize_bearing_takes_short_way() {
        assert_eq!(normalize_bearing(170.0, -170.0), -190.0);
        assert_eq!(normalize_bearing(-170.0, 170.0), 190.0);
        assert_eq!(normalize_bearing(90.0, 0.0), 90.0);
        assert_eq!(normalize_bearing(540.0, 0.0), -180.0);
    }

    #[test]
    fn test_normalize_center_crosses_antimeridian() {
        let mut viewport = Viewport::default();
        viewport.set_center(LatLng::new(0.0, 170.0));
        let center = normalize_center(&viewport, LatLng::new(0.0, -170.0));
        assert_eq!(center.lng, 190.0);

        viewport.set_render_world_copies(false);
        let center = normalize_center(&viewport, LatLng::new(0.0, -170.0));
        assert_eq!(center.lng, -170.0);
    }

    #[test]
    fn test_ease_to_runs_over_frames() {
        let h = Harness::new();
        h.camera.ease_to(
            EaseToOptions::new(CameraOptions::new().with_zoom(4.0))
                .with_animation(AnimationOptions::new().with_duration(100.0)),
            None,
        );

        assert!(h.camera.is_easing());
        assert!(h.camera.is_zooming());
        assert_eq!(h.events(), vec!["movestart", "zoomstart"]);

        h.run_for(50.0, 16.0);
        let midway = h.camera.zoom();
        assert!(midway > 2.0 && midway < 4.0);

        h.run_for(100.0, 16.0);
        assert_eq!(h.camera.zoom(), 4.0);
        assert!(!h.camera.is_easing());
        assert!(!h.camera.is_moving());
        assert_eq!(h.scheduler.pending(), 0);

        let events = h.events();
        assert_eq!(events.last().map(String::as_str), Some("moveend"));
        assert_eq!(events.iter().filter(|e| *e == "zoomend").count(), 1);
    }

    #[test]
    fn test_rotate_event_only_when_bearing_changes() {
        let h = Harness::new();
        h.camera
            .rotate_to(45.0, AnimationOptions::instant(), None);
        assert_eq!(h.camera.bearing(), 45.0);
        assert_eq!(
            h.events(),
            vec!["movestart", "rotatestart", "move", "rotate", "rotateend", "moveend"]
        );
    }

    #[test]
    fn test_stop_fires_end_events_once() {
        let h = Harness::new();
        h.camera.zoom_to(5.0, AnimationOptions::new(), None);
        h.run_for(32.0, 16.0);

        h.camera.stop();
        h.camera.stop();
        let events = h.events();
        assert_eq!(events.iter().filter(|e| *e == "moveend").count(), 1);
        assert_eq!(events.iter().filter(|e| *e == "zoomend").count(), 1);
        assert!(h.camera.zoom() < 5.0);

        // The cancelled frame never runs
        h.run_for(1000.0, 16.0);
        assert_eq!(h.events().len(), events.len());
    }

    #[test]
    fn test_animate_false_is_immediate() {
        let h = Harness::new();
        h.camera.pan_by(
            Point::new(100.0, 0.0),
            AnimationOptions::new().with_animate(false),
            None,
        );
        assert!(!h.camera.is_easing());
        assert!(h.camera.center().lng > 0.0);
        assert_eq!(h.scheduler.pending(), 0);
    }

    #[test]
    fn test_reduced_motion_skips_non_essential() {
        let h = Harness::new();
        h.camera.set_motion_profile(MotionProfile::ReducedMotion);

        h.camera.zoom_to(3.0, AnimationOptions::new(), None);
        assert_eq!(h.camera.zoom(), 3.0);
        assert!(!h.camera.is_easing());

        h.camera.zoom_to(4.0, AnimationOptions::new().essential(), None);
        assert!(h.camera.is_easing());
    }

    #[test]
    fn test_snap_to_north_only_near_north() {
        let h = Harness::new();
        h.camera.set_bearing(30.0, None);
        h.camera.snap_to_north(AnimationOptions::instant(), None);
        assert_eq!(h.camera.bearing(), 30.0);

        h.camera.set_bearing(5.0, None);
        h.camera.snap_to_north(AnimationOptions::instant(), None);
        assert_eq!(h.camera.bearing(), 0.0);
    }

    #[test]
    fn test_reset_north_uses_reset_duration() {
        let h = Harness::new();
        h.camera.set_bearing(90.0, None);
        h.camera.reset_north(AnimationOptions::new(), None);

        h.run_for(600.0, 20.0);
        assert!(h.camera.is_easing());
        h.run_for(500.0, 20.0);
        assert!(!h.camera.is_easing());
        assert_eq!(h.camera.bearing(), 0.0);
    }

    #[test]
    fn test_dropping_camera_cancels_frame() {
        let h = Harness::new();
        h.camera.zoom_to(6.0, AnimationOptions::new(), None);
        assert_eq!(h.scheduler.pending(), 1);

        let Harness {
            camera, scheduler, ..
        } = h;
        drop(camera);
        assert_eq!(scheduler.pending(), 0);
    }
}
