//! Headless Bevy integration tests for scene generation and the frame loop.
//!
//! These tests verify the scene builds and animates correctly without GPU.

mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use common::{headless_app, run_frames, settled_app, ENTRANCE_FRAMES};
use orrery::frame::{SelfRotation, StarfieldPulse};
use orrery::registry::{BodyVisual, SceneRegistry};
use orrery::tween::Tweens;

fn root_scales(app: &App) -> Vec<Vec3> {
    let registry = app.world().resource::<SceneRegistry>();
    registry
        .instances()
        .iter()
        .map(|instance| {
            app.world()
                .get::<Transform>(instance.visual().root())
                .unwrap()
                .scale
        })
        .collect()
}

#[test]
fn test_registry_matches_catalog_order() {
    let mut app = headless_app();
    app.update();

    let registry = app.world().resource::<SceneRegistry>();
    let names: Vec<_> = registry
        .instances()
        .iter()
        .map(|i| i.descriptor().name)
        .collect();
    assert_eq!(
        names,
        vec!["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
    );
    assert!(registry.active_instance().is_none());
}

#[test]
fn test_bodies_start_collapsed() {
    let mut app = headless_app();
    app.update();

    for scale in root_scales(&app) {
        assert_eq!(scale, Vec3::ZERO);
    }
    // One entrance tween per body, none finished yet
    assert_eq!(app.world().resource::<Tweens>().len(), 9);
}

#[test]
fn test_entrance_is_staggered() {
    let mut app = headless_app();
    // Eleven 100 ms steps after the first frame
    run_frames(&mut app, 12);

    let scales = root_scales(&app);
    assert_eq!(scales[0], Vec3::ONE);
    assert_relative_eq!(scales[1].x, 0.9, epsilon = 1e-4);
    assert_eq!(scales[8], Vec3::ZERO);
}

#[test]
fn test_entrance_settles_at_unit_scale() {
    let mut app = headless_app();
    run_frames(&mut app, ENTRANCE_FRAMES);

    for scale in root_scales(&app) {
        assert_eq!(scale, Vec3::ONE);
    }
    assert!(app.world().resource::<Tweens>().is_empty());
}

#[test]
fn test_ring_spins_body_only() {
    let (mut app, _) = settled_app();
    let (group, body, ring) = {
        let registry = app.world().resource::<SceneRegistry>();
        let BodyVisual::Ringed { group, body, ring } = registry.get(6).unwrap().visual() else {
            panic!("Saturn should be ringed");
        };
        (group, body, ring)
    };
    let ring_rotation = app.world().get::<Transform>(ring).unwrap().rotation;

    run_frames(&mut app, 10);

    let world = app.world();
    assert_ne!(world.get::<Transform>(body).unwrap().rotation, Quat::IDENTITY);
    assert_eq!(world.get::<Transform>(group).unwrap().rotation, Quat::IDENTITY);
    assert_eq!(world.get::<Transform>(ring).unwrap().rotation, ring_rotation);
}

#[test]
fn test_rotation_counts_frames() {
    let mut app = headless_app();
    app.update();
    let sun = app.world().resource::<SceneRegistry>().get(0).unwrap().visual().root();
    let mercury = app.world().resource::<SceneRegistry>().get(1).unwrap().visual().root();

    run_frames(&mut app, 99);

    // Sun speed 0.1, Mercury speed 1.0, 100 frames in total
    let world = app.world();
    assert_relative_eq!(world.get::<SelfRotation>(sun).unwrap().angle, 0.01, epsilon = 1e-5);
    assert_relative_eq!(world.get::<SelfRotation>(mercury).unwrap().angle, 0.1, epsilon = 1e-5);
}

#[test]
fn test_starfield_pulses_with_time() {
    let mut app = headless_app();
    app.update();
    assert_relative_eq!(app.world().resource::<StarfieldPulse>().point_size, 0.2);

    // 16 frames after the first: t = 1.6 s, close to the sine peak
    run_frames(&mut app, 16);
    let expected = 0.2 + 1.6f64.sin() as f32 * 0.1;
    assert_relative_eq!(
        app.world().resource::<StarfieldPulse>().point_size,
        expected,
        epsilon = 1e-4
    );
}

#[test]
fn test_clearing_tweens_freezes_entrance() {
    let mut app = headless_app();
    run_frames(&mut app, 6);
    app.world_mut().resource_mut::<Tweens>().clear();
    let before = root_scales(&app);

    run_frames(&mut app, 30);

    assert_eq!(root_scales(&app), before);
}
