//! Camera travel and zoom toggle tests.

mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use common::{click, position_of, run_frames, settled_app};
use orrery::camera::{travel_to, CameraSettings, ToggleZoom, ZoomControl, ZOOM_IN_LABEL, ZOOM_OUT_LABEL};
use orrery::registry::Selection;
use orrery::tween::Tweens;

fn start_travel(app: &mut App, camera: Entity, selection: Selection) {
    app.world_mut()
        .resource_scope(|world, mut tweens: Mut<Tweens>| {
            let mut transform = *world.get::<Transform>(camera).unwrap();
            travel_to(
                camera,
                &mut transform,
                &selection,
                &mut tweens,
                &CameraSettings::default(),
            );
            *world.get_mut::<Transform>(camera).unwrap() = transform;
        });
}

#[test]
fn test_travel_halts_outside_approach_distance() {
    let (mut app, camera) = settled_app();
    let target = Vec3::ZERO;
    start_travel(
        &mut app,
        camera,
        Selection {
            index: 0,
            position: target,
            effective_radius: 5.0,
        },
    );

    run_frames(&mut app, 30);

    let final_position = position_of(&app, camera);
    assert_ne!(final_position, target);
    let distance = final_position.distance(target);
    assert!(distance < 75.0, "camera should be inside the stop distance, got {distance}");
    // 7.5 units per frame: the first sample below 75 is 67.5
    assert_relative_eq!(distance, 67.5, epsilon = 1e-2);
    assert!(app.world().resource::<Tweens>().is_empty());
}

#[test]
fn test_travel_snaps_to_baseline_first() {
    let (mut app, camera) = settled_app();
    app.world_mut().get_mut::<Transform>(camera).unwrap().translation =
        Vec3::new(0.0, 0.0, 40.0);

    start_travel(
        &mut app,
        camera,
        Selection {
            index: 3,
            position: Vec3::new(20.5, -0.85, 0.0),
            effective_radius: 1.5,
        },
    );

    assert_eq!(position_of(&app, camera).z, 150.0);
}

#[test]
fn test_clicking_sun_stops_short_of_surface() {
    let (mut app, camera) = settled_app();

    click(&mut app, Vec2::ZERO);
    run_frames(&mut app, 30);

    // Stop distance is 70 + 12; the camera passes it between 82.5 and 75
    let position = position_of(&app, camera);
    assert_relative_eq!(position.z, 75.0, epsilon = 1e-2);
    assert!(position.z > 12.0);
}

#[test]
fn test_unstopped_travel_snaps_to_destination() {
    let (mut app, camera) = settled_app();
    let target = Vec3::new(0.0, 0.0, 120.0);
    start_travel(
        &mut app,
        camera,
        Selection {
            index: 0,
            position: target,
            effective_radius: -100.0,
        },
    );

    run_frames(&mut app, 30);

    assert_eq!(position_of(&app, camera), target);
}

#[test]
fn test_zoom_round_trip() {
    let (mut app, camera) = settled_app();
    let start = position_of(&app, camera);

    app.world_mut().write_message(ToggleZoom);
    run_frames(&mut app, 15);
    assert_eq!(position_of(&app, camera), Vec3::new(0.0, 0.0, 90.0));
    assert_eq!(app.world().resource::<ZoomControl>().label(), ZOOM_OUT_LABEL);

    app.world_mut().write_message(ToggleZoom);
    run_frames(&mut app, 15);
    assert_eq!(position_of(&app, camera), start);
    assert_eq!(app.world().resource::<ZoomControl>().label(), ZOOM_IN_LABEL);
}

#[test]
fn test_zoom_out_keeps_lateral_position() {
    let (mut app, camera) = settled_app();
    app.world_mut().get_mut::<Transform>(camera).unwrap().translation =
        Vec3::new(12.0, 3.0, 90.0);

    // First toggle zooms in (x to 0), second zooms out (only z)
    app.world_mut().write_message(ToggleZoom);
    run_frames(&mut app, 15);
    assert_eq!(position_of(&app, camera), Vec3::new(0.0, 3.0, 90.0));

    app.world_mut().get_mut::<Transform>(camera).unwrap().translation.x = 5.0;
    app.world_mut().write_message(ToggleZoom);
    run_frames(&mut app, 15);
    assert_eq!(position_of(&app, camera), Vec3::new(5.0, 3.0, 150.0));
}
