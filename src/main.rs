//! Orrery - Animated Solar System Explorer
//!
//! A desktop application showing the Sun and planets. Click a body to fly
//! toward it and read about it.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::catalog::{Catalog, CatalogError};
use orrery::frame::FramePlugin;
use orrery::picking::BodyPickingPlugin;
use orrery::registry::ScenePlugin;
use orrery::render::RenderPlugin;
use orrery::tween::TweenPlugin;
use orrery::ui::UiPlugin;

fn main() -> Result<(), CatalogError> {
    // A malformed catalog aborts before any window or entity exists
    let catalog = Catalog::solar_system()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(catalog)
        // Add scene plugins
        .add_plugins((
            TweenPlugin,
            FramePlugin,
            ScenePlugin,
            CameraPlugin,
            BodyPickingPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();

    Ok(())
}
