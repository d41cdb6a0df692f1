//! Background rendering for the solar system visualization.
//!
//! Provides the pulsing starfield and the scene light.

use bevy::prelude::*;
use rand::Rng;

use crate::frame::{FramePhase, StarfieldPulse};

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarfieldSettings>()
            .add_systems(Startup, (spawn_starfield, spawn_lighting))
            .add_systems(Update, resize_stars.after(FramePhase::Ambient));
    }
}

/// Starfield layout.
#[derive(Resource, Clone, Debug)]
pub struct StarfieldSettings {
    pub count: usize,
    /// Edge length of the cube the stars are scattered in, centered on the origin.
    pub extent: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 200.0,
        }
    }
}

/// Marker for background stars.
#[derive(Component)]
pub struct Star;

/// Spawn the stars at random positions inside the starfield cube.
fn spawn_starfield(
    mut commands: Commands,
    settings: Res<StarfieldSettings>,
    pulse: Res<StarfieldPulse>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Unit-diameter sphere, scaled to the current point size
    let star_mesh = meshes.add(Sphere::new(0.5).mesh().uv(6, 4));
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    let mut rng = rand::thread_rng();
    let half = settings.extent * 0.5;

    for _ in 0..settings.count {
        let position = Vec3::new(
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        );
        commands.spawn((
            Star,
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(pulse.point_size)),
        ));
    }

    info!("Spawned {} background stars", settings.count);
}

/// Apply the current pulse to every star.
fn resize_stars(pulse: Res<StarfieldPulse>, mut stars: Query<&mut Transform, With<Star>>) {
    let scale = Vec3::splat(pulse.point_size);
    for mut transform in &mut stars {
        transform.scale = scale;
    }
}

/// Spawn lighting for the scene.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 5000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
