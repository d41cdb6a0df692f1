//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use orrery::camera::{CameraControlPlugin, CameraSettings, MainCamera};
use orrery::catalog::Catalog;
use orrery::frame::{FramePhase, FramePlugin};
use orrery::picking::{BodyPickingPlugin, PickRequest};
use orrery::registry::ScenePlugin;
use orrery::tween::TweenPlugin;
use orrery::ui::{bind_info_panel, InfoPanel};

/// Simulated frame length.
pub const FRAME: Duration = Duration::from_millis(100);

/// Frames needed for every body to finish its entrance.
pub const ENTRANCE_FRAMES: usize = 40;

/// Scene app without window, renderer or egui. Time advances by [`FRAME`]
/// per update, starting from zero on the first update.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(Catalog::solar_system().expect("built-in catalog"))
        .add_plugins((
            TweenPlugin,
            FramePlugin,
            ScenePlugin,
            CameraControlPlugin,
            BodyPickingPlugin,
        ))
        .init_resource::<InfoPanel>()
        .add_systems(Update, bind_info_panel.after(FramePhase::Tween));
    app
}

/// Spawn a main camera at the default position, as the camera plugin would.
pub fn spawn_camera(app: &mut App) -> Entity {
    let settings = CameraSettings::default();
    app.world_mut()
        .spawn((
            MainCamera,
            Transform::from_xyz(0.0, 0.0, settings.baseline_distance),
            Projection::Perspective(settings.projection()),
        ))
        .id()
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// App with a camera and every body fully scaled in.
pub fn settled_app() -> (App, Entity) {
    let mut app = headless_app();
    let camera = spawn_camera(&mut app);
    run_frames(&mut app, ENTRANCE_FRAMES);
    (app, camera)
}

pub fn click(app: &mut App, ndc: Vec2) {
    app.world_mut().write_message(PickRequest { ndc });
}

pub fn position_of(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("entity should have a transform")
        .translation
}
