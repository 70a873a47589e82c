use maplet_camera::prelude::*;
use std::cell::Cell;

/// Drives a camera without any window: the frame loop is pumped by hand and
/// time advances at a fixed 60fps step.
fn main() -> maplet_camera::Result<()> {
    maplet_camera::core::diagnostics::init_logging();

    println!("🗺️ Maplet Camera Headless Example");
    println!("=================================");

    let scheduler = Rc::new(ManualScheduler::new());
    let clock = Rc::new(ManualClock::new(0.0));
    let camera = CameraBuilder::headless(
        LatLng::new(37.7749, -122.4194), // San Francisco
        12.0,
        Point::new(1024.0, 768.0),
        scheduler.clone(),
    )
    .with_clock(clock.clone())
    .build()?;

    println!("✅ Camera created:");
    print_view(&camera);

    let frames = Rc::new(Cell::new(0u32));
    let counter = frames.clone();
    camera.on(names::MOVE, listener(move |_| counter.set(counter.get() + 1)));
    camera.on(
        names::MOVE_END,
        listener(|_| println!("   ⏹️ moveend")),
    );

    let pump = || {
        while scheduler.pending() > 0 {
            clock.advance(16.67); // ~60fps frame time
            scheduler.run_frame();
        }
    };

    println!("\n✈️ Flying between cities:");
    let locations = [
        ("New York", LatLng::new(40.7128, -74.0060), 11.0),
        ("London", LatLng::new(51.5074, -0.1278), 10.0),
        ("Tokyo", LatLng::new(35.6762, 139.6503), 12.0),
    ];

    for (name, location, zoom) in locations {
        frames.set(0);
        camera.fly_to(
            CameraOptions::new().with_center(location).with_zoom(zoom),
            None,
        );
        pump();
        println!("   📍 {} after {} frames", name, frames.get());
        print_view(&camera);
    }

    println!("\n🚀 Easing pans:");
    let pan_deltas = [
        (100.0, 0.0),   // East
        (0.0, 100.0),   // South
        (-50.0, -50.0), // Northwest
    ];

    for (dx, dy) in pan_deltas {
        let old_center = camera.center();
        camera.pan_by(Point::new(dx, dy), AnimationOptions::new(), None);
        pump();
        let new_center = camera.center();

        println!(
            "   Pan by ({}, {}) - Center moved from ({:.4}, {:.4}) to ({:.4}, {:.4})",
            dx, dy, old_center.lat, old_center.lng, new_center.lat, new_center.lng
        );
    }

    println!("\n🧭 Rotating and tilting:");
    camera.ease_to(
        CameraOptions::new().with_bearing(-30.0).with_pitch(45.0),
        None,
    );
    pump();
    print_view(&camera);

    camera.reset_north_pitch(AnimationOptions::new(), None);
    pump();
    print_view(&camera);

    println!("\n📐 Fitting bounds:");
    let bay_area = LatLngBounds::from_coords(37.2, -122.6, 38.0, -121.8);
    camera.fit_bounds(
        &bay_area,
        FitBoundsOptions::default().with_padding(Padding::Uniform(40.0)),
        None,
    );
    pump();
    print_view(&camera);

    println!("\n⏸️ Interrupting an animation:");
    camera.zoom_to(3.0, AnimationOptions::new().with_duration(2000.0), None);
    for _ in 0..10 {
        clock.advance(16.67);
        scheduler.run_frame();
    }
    camera.stop();
    println!("   Stopped at zoom {:.3}, easing: {}", camera.zoom(), camera.is_easing());

    println!("\n🎉 Headless example completed successfully!");
    Ok(())
}

fn print_view(camera: &Camera<Viewport>) {
    let center = camera.center();
    println!(
        "   Center: {:.4}, {:.4}  Zoom: {:.2}  Bearing: {:.1}  Pitch: {:.1}",
        center.lat,
        center.lng,
        camera.zoom(),
        camera.bearing(),
        camera.pitch()
    );
}
