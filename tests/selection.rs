//! Pointer selection tests: clicks resolved through the scene registry.

mod common;

use bevy::prelude::*;
use common::{click, headless_app, position_of, run_frames, settled_app, spawn_camera};
use orrery::registry::SceneRegistry;
use orrery::ui::InfoPanel;

/// Screen point over Saturn's ring, outside Saturn itself, seen from the
/// default camera position.
const RING_NDC: Vec2 = Vec2::new(0.9758, -0.018);

/// Screen point with nothing behind it.
const EMPTY_NDC: Vec2 = Vec2::new(0.99, 0.99);

fn active_name(app: &App) -> Option<&'static str> {
    app.world()
        .resource::<SceneRegistry>()
        .active_instance()
        .map(|instance| instance.descriptor().name)
}

fn active_count(app: &App) -> usize {
    app.world()
        .resource::<SceneRegistry>()
        .instances()
        .iter()
        .filter(|instance| instance.is_active())
        .count()
}

#[test]
fn test_click_center_selects_sun() {
    let (mut app, _) = settled_app();

    click(&mut app, Vec2::ZERO);
    app.update();

    assert_eq!(active_name(&app), Some("Sun"));
    assert_eq!(active_count(&app), 1);
    assert_eq!(app.world().resource::<InfoPanel>().title, "Sun");
}

#[test]
fn test_click_on_ring_selects_saturn() {
    let (mut app, _) = settled_app();

    click(&mut app, RING_NDC);
    app.update();

    assert_eq!(active_name(&app), Some("Saturn"));
    let panel = app.world().resource::<InfoPanel>();
    assert_eq!(panel.title, "Saturn");
}

#[test]
fn test_click_on_empty_space_changes_nothing() {
    let (mut app, camera) = settled_app();
    let camera_before = position_of(&app, camera);

    click(&mut app, EMPTY_NDC);
    run_frames(&mut app, 5);

    assert_eq!(active_name(&app), None);
    assert_eq!(position_of(&app, camera), camera_before);
    assert_eq!(*app.world().resource::<InfoPanel>(), InfoPanel::default());
}

#[test]
fn test_empty_click_keeps_previous_selection_and_text() {
    let (mut app, _) = settled_app();
    click(&mut app, Vec2::ZERO);
    app.update();

    click(&mut app, EMPTY_NDC);
    app.update();

    assert_eq!(active_name(&app), Some("Sun"));
    assert_eq!(app.world().resource::<InfoPanel>().title, "Sun");
}

#[test]
fn test_new_selection_replaces_old() {
    let (mut app, camera) = settled_app();
    click(&mut app, Vec2::ZERO);
    run_frames(&mut app, 30);

    // Back to the default view, then pick the ring
    app.world_mut().get_mut::<Transform>(camera).unwrap().translation =
        Vec3::new(0.0, 0.0, 150.0);
    click(&mut app, RING_NDC);
    app.update();

    assert_eq!(active_name(&app), Some("Saturn"));
    assert_eq!(active_count(&app), 1);
    assert_eq!(app.world().resource::<InfoPanel>().title, "Saturn");
}

#[test]
fn test_collapsed_bodies_cannot_be_picked() {
    let mut app = headless_app();
    spawn_camera(&mut app);
    app.update();

    // Every body still has zero scale
    click(&mut app, Vec2::ZERO);
    app.update();

    assert_eq!(active_name(&app), None);
}

#[test]
fn test_click_without_camera_is_ignored() {
    let mut app = headless_app();
    run_frames(&mut app, 40);

    click(&mut app, Vec2::ZERO);
    app.update();

    assert_eq!(active_name(&app), None);
}
