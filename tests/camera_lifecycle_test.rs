use maplet_camera::camera::FlightPath;
use maplet_camera::prelude::*;
use serde_json::json;
use std::cell::RefCell;

/// Scenario tests for camera event ordering, cancellation and completion
#[cfg(test)]
mod camera_lifecycle_tests {
    use super::*;

    const ALL_EVENTS: [&str; 12] = [
        "movestart",
        "move",
        "moveend",
        "zoomstart",
        "zoom",
        "zoomend",
        "rotatestart",
        "rotate",
        "rotateend",
        "pitchstart",
        "pitch",
        "pitchend",
    ];

    struct Fixture {
        camera: Rc<Camera<Viewport>>,
        scheduler: Rc<ManualScheduler>,
        clock: Rc<ManualClock>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::at(LatLng::new(0.0, 0.0), 2.0)
        }

        fn at(center: LatLng, zoom: f64) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();

            let scheduler = Rc::new(ManualScheduler::new());
            let clock = Rc::new(ManualClock::new(0.0));
            let camera =
                CameraBuilder::headless(center, zoom, Point::new(512.0, 512.0), scheduler.clone())
                    .with_clock(clock.clone())
                    .build()
                    .expect("valid camera");

            let log = Rc::new(RefCell::new(Vec::new()));
            for name in ALL_EVENTS {
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

        /// Advances time frame by frame until no frame is pending
        fn settle(&self) {
            for _ in 0..10_000 {
                if self.scheduler.pending() == 0 {
                    return;
                }
                self.clock.advance(16.0);
                self.scheduler.run_frame();
            }
            panic!("animation did not settle");
        }

        fn frame_at(&self, now_ms: f64) {
            self.clock.set(now_ms);
            self.scheduler.run_frame();
        }

        fn events(&self) -> Vec<String> {
            self.log.borrow().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.log.borrow().iter().filter(|e| *e == name).count()
        }

        fn clear(&self) {
            self.log.borrow_mut().clear();
        }
    }

    #[test]
    fn test_zero_duration_ease_fires_in_order() {
        let f = Fixture::new();
        let start_zoom = f.camera.zoom();

        f.camera.ease_to(
            EaseToOptions::new(CameraOptions::new().with_zoom(start_zoom + 2.0))
                .with_animation(AnimationOptions::instant()),
            None,
        );

        assert_eq!(
            f.events(),
            vec!["movestart", "zoomstart", "move", "zoom", "zoomend", "moveend"]
        );
        assert_eq!(f.camera.zoom(), start_zoom + 2.0);
        assert!(!f.camera.is_easing());
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_jump_to_same_zoom_fires_only_move_events() {
        let f = Fixture::new();
        f.camera
            .jump_to(CameraOptions::new().with_zoom(f.camera.zoom()), None);
        assert_eq!(f.events(), vec!["movestart", "move", "moveend"]);
    }

    #[test]
    fn test_jump_to_nests_axis_triples_between_move_and_moveend() {
        let f = Fixture::new();
        f.camera.jump_to(
            CameraOptions::new()
                .with_center(LatLng::new(10.0, 10.0))
                .with_zoom(5.0)
                .with_bearing(30.0),
            None,
        );
        assert_eq!(
            f.events(),
            vec![
                "movestart",
                "move",
                "zoomstart",
                "zoom",
                "zoomend",
                "rotatestart",
                "rotate",
                "rotateend",
                "moveend"
            ]
        );
        assert_eq!(f.camera.center(), LatLng::new(10.0, 10.0));
        assert!(!f.camera.is_easing());
    }

    #[test]
    fn test_second_ease_ends_first_exactly_once() {
        let f = Fixture::new();
        f.camera.zoom_to(6.0, AnimationOptions::new(), None);
        f.frame_at(100.0);
        f.camera
            .rotate_to(90.0, AnimationOptions::new().with_duration(200.0), None);

        let events = f.events();
        let second_start = events
            .iter()
            .rposition(|e| e == "movestart")
            .expect("second animation started");
        let ends_before: Vec<_> = events[..second_start]
            .iter()
            .filter(|e| *e == "moveend" || *e == "zoomend")
            .collect();
        assert_eq!(ends_before, vec!["zoomend", "moveend"]);

        f.settle();
        assert_eq!(f.count("movestart"), 2);
        assert_eq!(f.count("moveend"), 2);
        assert_eq!(f.camera.bearing(), 90.0);
    }

    #[test]
    fn test_stop_without_animation_is_a_no_op() {
        let f = Fixture::new();
        f.camera.stop().stop();
        assert!(f.events().is_empty());
    }

    #[test]
    fn test_moveend_listener_may_start_a_new_animation() {
        let f = Fixture::new();
        let weak = Rc::downgrade(&f.camera);
        f.camera.once(
            "moveend",
            listener(move |_| {
                if let Some(camera) = weak.upgrade() {
                    camera.zoom_to(7.0, AnimationOptions::new().with_duration(100.0), None);
                }
            }),
        );

        f.camera
            .zoom_to(4.0, AnimationOptions::new().with_duration(100.0), None);
        f.frame_at(50.0);
        f.camera.stop();

        // The listener's animation survived the stop that triggered it
        assert!(f.camera.is_easing());
        f.settle();

        assert_eq!(f.camera.zoom(), 7.0);
        assert_eq!(f.count("movestart"), 2);
        assert_eq!(f.count("moveend"), 2);
        assert!(!f.camera.is_moving());
    }

    #[test]
    fn test_listener_restarting_on_natural_completion() {
        let f = Fixture::new();
        let weak = Rc::downgrade(&f.camera);
        f.camera.once(
            "zoomend",
            listener(move |_| {
                if let Some(camera) = weak.upgrade() {
                    camera.zoom_to(3.0, AnimationOptions::new().with_duration(50.0), None);
                }
            }),
        );

        f.camera
            .zoom_to(5.0, AnimationOptions::new().with_duration(50.0), None);
        f.settle();

        assert_eq!(f.camera.zoom(), 3.0);
        assert_eq!(f.count("movestart"), f.count("moveend"));
        assert_eq!(f.count("zoomend"), 2);
    }

    #[test]
    fn test_movestart_listener_replacing_animation() {
        let f = Fixture::new();
        let weak = Rc::downgrade(&f.camera);
        f.camera.once(
            "movestart",
            listener(move |_| {
                if let Some(camera) = weak.upgrade() {
                    camera.zoom_to(8.0, AnimationOptions::instant(), None);
                }
            }),
        );

        f.camera
            .zoom_to(4.0, AnimationOptions::new().with_duration(100.0), None);
        f.settle();

        assert_eq!(f.camera.zoom(), 8.0);
        assert_eq!(f.count("movestart"), f.count("moveend"));
        assert!(!f.camera.is_moving());
    }

    #[test]
    fn test_delay_end_events_holds_moveend() {
        let f = Fixture::new();
        f.camera.zoom_to(
            4.0,
            AnimationOptions::new()
                .with_duration(100.0)
                .with_delay_end_events(200.0),
            None,
        );

        f.frame_at(50.0);
        f.frame_at(100.0);
        assert_eq!(f.camera.zoom(), 4.0);
        assert!(!f.camera.is_easing());
        assert!(f.camera.is_moving());
        assert_eq!(f.count("moveend"), 0);

        f.frame_at(250.0);
        assert_eq!(f.count("moveend"), 0);

        f.frame_at(300.0);
        assert_eq!(f.count("zoomend"), 1);
        assert_eq!(f.count("moveend"), 1);
        assert!(!f.camera.is_moving());
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_stop_during_end_delay_fires_end_events_now() {
        let f = Fixture::new();
        f.camera.zoom_to(
            4.0,
            AnimationOptions::instant().with_delay_end_events(500.0),
            None,
        );
        assert_eq!(f.count("moveend"), 0);

        f.camera.stop();
        assert_eq!(f.count("moveend"), 1);
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn test_ease_to_does_not_clamp_target_zoom_but_fly_to_does() {
        // easeTo interpolates toward the raw target and relies on the
        // transform to clamp each frame; flyTo clamps the target first
        let linear = AnimationOptions::new()
            .with_duration(100.0)
            .with_easing(EasingFunction::Linear);

        let eased = Fixture::at(LatLng::new(0.0, 0.0), 20.0);
        eased.camera.ease_to(
            EaseToOptions::new(CameraOptions::new().with_zoom(30.0)).with_animation(linear),
            None,
        );
        eased.frame_at(50.0);
        assert_eq!(eased.camera.zoom(), 22.0);

        let flown = Fixture::at(LatLng::new(0.0, 0.0), 20.0);
        flown.camera.fly_to(
            FlyToOptions::new(CameraOptions::new().with_zoom(30.0)).with_animation(linear),
            None,
        );
        flown.frame_at(50.0);
        assert!((flown.camera.zoom() - 21.0).abs() < 1e-9);

        flown.settle();
        assert_eq!(flown.camera.zoom(), 22.0);
    }

    #[test]
    fn test_fly_to_current_view_completes_by_easing() {
        let f = Fixture::new();
        let options = FlyToOptions::new(
            CameraOptions::new()
                .with_center(f.camera.center())
                .with_zoom(f.camera.zoom()),
        );

        f.camera.fly_to(options, None);
        f.settle();

        assert_eq!(f.events().first().map(String::as_str), Some("movestart"));
        assert_eq!(f.events().last().map(String::as_str), Some("moveend"));
        assert_eq!(f.count("zoomstart"), 0);
        assert!(!f.camera.is_easing());
    }

    #[test]
    fn test_fly_to_zooms_out_mid_flight_and_lands_on_target() {
        let f = Fixture::new();
        let target = LatLng::new(0.0, 170.0);
        let lowest = Rc::new(RefCell::new(f64::MAX));

        let weak = Rc::downgrade(&f.camera);
        let sink = lowest.clone();
        f.camera.on(
            "move",
            listener(move |_| {
                if let Some(camera) = weak.upgrade() {
                    let mut lowest = sink.borrow_mut();
                    *lowest = lowest.min(camera.zoom());
                }
            }),
        );

        f.camera.fly_to(
            FlyToOptions::new(CameraOptions::new().with_center(target).with_zoom(2.0))
                .with_animation(AnimationOptions::new().with_duration(1000.0)),
            None,
        );
        f.settle();

        assert!(*lowest.borrow() < 2.0);
        assert_eq!(f.camera.zoom(), 2.0);
        assert!((f.camera.center().lng - 170.0).abs() < 1e-6);
        assert!(f.camera.center().lat.abs() < 1e-6);
        assert_eq!(f.count("zoomstart"), 1);
    }

    #[test]
    fn test_fly_to_over_max_duration_is_instant() {
        let f = Fixture::new();
        f.camera.fly_to(
            FlyToOptions::new(
                CameraOptions::new()
                    .with_center(LatLng::new(40.0, 100.0))
                    .with_zoom(9.0),
            )
            .with_flight(FlightOptions::default().with_max_duration(1.0)),
            None,
        );

        assert_eq!(f.camera.zoom(), 9.0);
        assert_eq!(f.count("moveend"), 1);
        assert_eq!(f.scheduler.pending(), 0);
    }

    /// Flies a quarter of the world east at constant zoom and checks the
    /// flight ends between 98% and 102% of `expected_ms`
    fn assert_flight_takes(flight: FlightOptions, expected_ms: f64) {
        let f = Fixture::new();
        f.camera.fly_to(
            FlyToOptions::new(
                CameraOptions::new()
                    .with_center(LatLng::new(0.0, 90.0))
                    .with_zoom(2.0),
            )
            .with_flight(flight),
            None,
        );
        assert!(f.camera.is_easing());

        f.frame_at(expected_ms * 0.98);
        assert!(f.camera.is_easing(), "finished before {}ms", expected_ms);

        f.frame_at(expected_ms * 1.02);
        assert!(!f.camera.is_easing(), "still flying after {}ms", expected_ms);
        assert!((f.camera.center().lng - 90.0).abs() < 1e-6);
        assert_eq!(f.count("moveend"), 1);
    }

    #[test]
    fn test_fly_to_duration_follows_speed() {
        // 90 degrees at zoom 2 is 512 pixels, one viewport width
        let length = FlightPath::plan(512.0, 512.0, 512.0, 1.42)
            .expect("flight path")
            .length();

        assert_flight_takes(FlightOptions::default(), 1000.0 * length / 1.2);
        assert_flight_takes(
            FlightOptions::default().with_speed(3.0),
            1000.0 * length / 3.0,
        );
    }

    #[test]
    fn test_fly_to_duration_follows_screen_speed() {
        let rho = 2.0;
        let length = FlightPath::plan(512.0, 512.0, 512.0, rho)
            .expect("flight path")
            .length();

        assert_flight_takes(
            FlightOptions::default()
                .with_curve(rho)
                .with_screen_speed(1.5),
            1000.0 * length / (1.5 / rho),
        );
    }

    #[test]
    fn test_fly_to_with_min_zoom_reaches_apex() {
        let f = Fixture::at(LatLng::new(0.0, 0.0), 6.0);
        let lowest = Rc::new(RefCell::new(f64::MAX));

        let weak = Rc::downgrade(&f.camera);
        let sink = lowest.clone();
        f.camera.on(
            "zoom",
            listener(move |_| {
                if let Some(camera) = weak.upgrade() {
                    let mut lowest = sink.borrow_mut();
                    *lowest = lowest.min(camera.zoom());
                }
            }),
        );

        f.camera.fly_to(
            FlyToOptions::new(
                CameraOptions::new()
                    .with_center(LatLng::new(0.0, 10.0))
                    .with_zoom(6.0),
            )
            .with_flight(FlightOptions::default().with_min_zoom(3.0)),
            None,
        );
        f.settle();

        let lowest = *lowest.borrow();
        assert!(lowest < 3.2 && lowest > 2.8, "apex zoom was {}", lowest);
    }

    #[test]
    fn test_fit_bounds_with_oversized_padding_leaves_view_unchanged() {
        let f = Fixture::new();
        let bounds = LatLngBounds::from_coords(-10.0, -20.0, 10.0, 20.0);
        let options = FitBoundsOptions::default()
            .with_padding(Padding::edges(1_000_000.0, 0.0, 0.0, 0.0));

        assert!(f.camera.camera_for_bounds(&bounds, &options).is_none());

        let before = (f.camera.center(), f.camera.zoom(), f.camera.bearing());
        f.camera.fit_bounds(&bounds, options, None);
        assert_eq!(before, (f.camera.center(), f.camera.zoom(), f.camera.bearing()));
        assert!(f.events().is_empty());
    }

    #[test]
    fn test_fit_bounds_linear() {
        let f = Fixture::at(LatLng::new(30.0, 30.0), 0.0);
        f.camera.set_bearing(45.0, None);
        f.clear();

        let bounds = LatLngBounds::from_coords(-10.0, -20.0, 10.0, 20.0);
        f.camera.fit_bounds(
            &bounds,
            FitBoundsOptions::default()
                .linear(true)
                .with_animation(AnimationOptions::instant()),
            None,
        );

        let expected = (512.0_f64 / (512.0 * 40.0 / 360.0)).log2();
        assert!((f.camera.zoom() - expected).abs() < 1e-9);
        assert!(f.camera.center().lat.abs() < 1e-6);
        assert!(f.camera.center().lng.abs() < 1e-6);
        assert_eq!(f.camera.bearing(), 0.0);
        assert_eq!(f.count("rotateend"), 1);
    }

    #[test]
    fn test_event_data_reaches_every_event() {
        let f = Fixture::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in ["movestart", "zoom", "moveend"] {
            let sink = seen.clone();
            f.camera.on(
                name,
                listener(move |event| sink.borrow_mut().push(event.get("source").cloned())),
            );
        }

        let mut data = EventData::new();
        data.insert("source".to_string(), json!("api"));
        f.camera.zoom_in(AnimationOptions::new().with_duration(32.0), Some(data));
        f.settle();

        let seen = seen.borrow();
        assert!(seen.len() >= 3);
        assert!(seen.iter().all(|value| value == &Some(json!("api"))));
    }

    #[test]
    fn test_camera_events_bubble_to_parent() {
        let f = Fixture::new();
        let map = Evented::new();
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink = received.clone();
        map.on(
            "moveend",
            listener(move |event| sink.borrow_mut().push(event.get("layer").cloned())),
        );

        let mut data = EventData::new();
        data.insert("layer".to_string(), json!("camera"));
        f.camera
            .events()
            .set_evented_parent(Some(&map), Some(ParentData::Static(data)));

        f.camera.set_zoom(4.0, None);
        assert_eq!(*received.borrow(), vec![Some(json!("camera"))]);
    }

    #[test]
    fn test_pan_by_moves_toward_offset() {
        let f = Fixture::new();
        f.camera
            .pan_by(Point::new(0.0, -100.0), AnimationOptions::instant(), None);
        assert!(f.camera.center().lat > 0.0);
        assert!(f.camera.center().lng.abs() < 1e-9);
    }

    #[test]
    fn test_reset_north_pitch() {
        let f = Fixture::new();
        f.camera.jump_to(
            CameraOptions::new().with_bearing(-40.0).with_pitch(30.0),
            None,
        );
        f.clear();

        f.camera.reset_north_pitch(AnimationOptions::new(), None);
        assert!(f.camera.is_rotating());
        assert!(f.camera.is_pitching());
        f.settle();

        assert_eq!(f.camera.bearing(), 0.0);
        assert_eq!(f.camera.pitch(), 0.0);
        assert_eq!(f.count("pitchend"), 1);
        assert_eq!(f.count("rotateend"), 1);
    }
}
