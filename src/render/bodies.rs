//! Body construction and surface meshes.
//!
//! [`build`] spawns the logical entities for one descriptor. Meshes and
//! textured materials are attached afterwards by [`attach_surface_meshes`],
//! so the scene can be built and picked without any render assets.

use bevy::prelude::*;

use crate::catalog::BodyDescriptor;
use crate::frame::SelfRotation;
use crate::picking::PickShape;
use crate::registry::{BodyInstance, BodyVisual};

/// Ring tilt about the local X axis, in radians.
pub const RING_TILT: f32 = 5.0;

/// Sphere subdivisions for body meshes.
const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 32;

/// Segments around the ring mesh.
const RING_RESOLUTION: u32 = 50;

/// Sphere surface of a body.
#[derive(Component, Clone, Debug)]
pub struct BodySurface {
    pub radius: f32,
    pub texture: &'static str,
}

/// Flat ring surface around a body.
#[derive(Component, Clone, Debug)]
pub struct RingSurface {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
}

/// Plugin attaching meshes to newly built surfaces.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, attach_surface_meshes);
    }
}

/// Spawn the representation of one body with its scale collapsed to zero.
///
/// A ringed body becomes a group holding the sphere and the ring; only the
/// group is positioned. Otherwise the sphere itself is positioned.
pub fn build(commands: &mut Commands, descriptor: &BodyDescriptor) -> BodyInstance {
    let placed = Transform::from_translation(descriptor.position).with_scale(Vec3::ZERO);
    let surface = (
        BodySurface {
            radius: descriptor.radius,
            texture: descriptor.texture,
        },
        PickShape::Sphere {
            radius: descriptor.radius,
        },
        SelfRotation::new(descriptor.speed),
        Visibility::default(),
    );

    let visual = match &descriptor.ring {
        None => {
            let surface = commands
                .spawn((Name::new(descriptor.name), surface, placed))
                .id();
            BodyVisual::Single { surface }
        }
        Some(ring) => {
            let group = commands
                .spawn((
                    Name::new(format!("{} system", descriptor.name)),
                    placed,
                    Visibility::default(),
                ))
                .id();
            let body = commands
                .spawn((
                    Name::new(descriptor.name),
                    surface,
                    Transform::IDENTITY,
                    ChildOf(group),
                ))
                .id();
            let ring = commands
                .spawn((
                    Name::new(format!("{} ring", descriptor.name)),
                    RingSurface {
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                        texture: ring.texture,
                    },
                    PickShape::Annulus {
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                    },
                    Transform::from_rotation(Quat::from_rotation_x(RING_TILT)),
                    Visibility::default(),
                    ChildOf(group),
                ))
                .id();
            BodyVisual::Ringed { group, body, ring }
        }
    };

    BodyInstance::new(descriptor.clone(), visual)
}

/// Give new surfaces their meshes and textured materials.
///
/// Textures load asynchronously. Until they arrive, or if loading fails,
/// surfaces render untextured.
pub fn attach_surface_meshes(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bodies: Query<(Entity, &BodySurface), Added<BodySurface>>,
    rings: Query<(Entity, &RingSurface), Added<RingSurface>>,
) {
    for (entity, surface) in &bodies {
        let mesh = meshes.add(
            Sphere::new(surface.radius)
                .mesh()
                .uv(SPHERE_SECTORS, SPHERE_STACKS),
        );
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(surface.texture)),
            perceptual_roughness: 1.0,
            ..default()
        });
        commands
            .entity(entity)
            .insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }

    for (entity, ring) in &rings {
        let mesh = meshes.add(
            Annulus::new(ring.inner_radius, ring.outer_radius)
                .mesh()
                .resolution(RING_RESOLUTION),
        );
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(ring.texture)),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        commands
            .entity(entity)
            .insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}
