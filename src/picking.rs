//! Pointer hit-testing against body surfaces.
//!
//! Clicks are converted to normalized device coordinates, cast as a ray from
//! the main camera, and intersected with the analytic [`PickShape`] of every
//! surface. The nearest hit is resolved through the [`SceneRegistry`] so that
//! a click on a ring selects the body it surrounds.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{self, CameraSettings, MainCamera};
use crate::frame::FramePhase;
use crate::registry::{SceneRegistry, Selection};
use crate::tween::Tweens;

/// Plugin providing click-to-select for bodies.
pub struct BodyPickingPlugin;

impl Plugin for BodyPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerOverUi>()
            .add_message::<PickRequest>()
            .add_systems(
                Update,
                (emit_pick_requests, resolve_pick_requests)
                    .chain()
                    .before(FramePhase::Rotation),
            );
    }
}

/// Set by the UI when the pointer is over a panel, so clicks there do not
/// reach the scene.
#[derive(Resource, Default)]
pub struct PointerOverUi(pub bool);

/// A click to resolve, in normalized device coordinates.
#[derive(Message, Clone, Copy, Debug)]
pub struct PickRequest {
    pub ndc: Vec2,
}

/// Intersection volume of a surface, in the surface's local space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum PickShape {
    /// Sphere centered on the origin.
    Sphere { radius: f32 },
    /// Flat ring in the local XY plane, centered on the origin.
    Annulus {
        inner_radius: f32,
        outer_radius: f32,
    },
}

impl PickShape {
    /// Ray parameter of the first intersection at or after the origin.
    /// `direction` need not be normalized.
    pub fn intersect_local(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match *self {
            PickShape::Sphere { radius } => {
                let a = direction.length_squared();
                if a <= f32::EPSILON {
                    return None;
                }
                let b = origin.dot(direction);
                let c = origin.length_squared() - radius * radius;
                let discriminant = b * b - a * c;
                if discriminant < 0.0 {
                    return None;
                }
                let root = discriminant.sqrt();
                let near = (-b - root) / a;
                let far = (-b + root) / a;
                if near >= 0.0 {
                    Some(near)
                } else if far >= 0.0 {
                    // Ray starts inside the sphere
                    Some(far)
                } else {
                    None
                }
            }
            PickShape::Annulus {
                inner_radius,
                outer_radius,
            } => {
                if direction.z.abs() <= f32::EPSILON {
                    return None;
                }
                let t = -origin.z / direction.z;
                if t < 0.0 {
                    return None;
                }
                let distance = (origin + direction * t).truncate().length();
                (inner_radius..=outer_radius).contains(&distance).then_some(t)
            }
        }
    }

    /// Distance along a world-space ray to this shape placed at `transform`.
    /// Collapsed transforms (zero scale during the entrance) never hit.
    pub fn intersect(&self, transform: &GlobalTransform, ray: Ray3d) -> Option<f32> {
        let affine = transform.affine();
        if affine.matrix3.determinant().abs() <= 1e-12 {
            return None;
        }
        let inverse = affine.inverse();
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(*ray.direction);
        // Affine maps preserve the ray parameter, and the world direction is
        // unit length, so the local parameter is the world distance.
        self.intersect_local(origin, direction)
    }
}

/// Nearest surface hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Convert a cursor position in logical pixels to normalized device coordinates.
pub fn pointer_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Ray from a perspective camera through a point in normalized device coordinates.
pub fn camera_ray(
    transform: &Transform,
    projection: &PerspectiveProjection,
    ndc: Vec2,
) -> Option<Ray3d> {
    let half_height = (projection.fov * 0.5).tan();
    let view_direction = Vec3::new(
        ndc.x * half_height * projection.aspect_ratio,
        ndc.y * half_height,
        -1.0,
    );
    let direction = Dir3::new(transform.rotation * view_direction).ok()?;
    Some(Ray3d::new(transform.translation, direction))
}

/// Closest surface intersected by `ray`.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    surfaces: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a PickShape)>,
) -> Option<PickHit> {
    surfaces
        .into_iter()
        .filter_map(|(entity, transform, shape)| {
            shape
                .intersect(transform, ray)
                .map(|distance| PickHit { entity, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Resolve a ray to the instance owning the nearest surface it hits.
pub fn pick<'a>(
    ray: Ray3d,
    surfaces: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a PickShape)>,
    registry: &SceneRegistry,
) -> Option<Selection> {
    let hit = nearest_hit(ray, surfaces)?;
    let selection = registry.resolve(hit.entity);
    if selection.is_none() {
        debug!("Picked surface {:?} has no owning body", hit.entity);
    }
    selection
}

/// Turn primary-window clicks into pick requests.
fn emit_pick_requests(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    pointer_over_ui: Res<PointerOverUi>,
    mut requests: MessageWriter<PickRequest>,
) {
    let Some(mouse) = mouse else {
        return;
    };
    if !mouse.just_released(MouseButton::Left) || pointer_over_ui.0 {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(ndc) = pointer_ndc(cursor, Vec2::new(window.width(), window.height())) else {
        return;
    };

    requests.write(PickRequest { ndc });
}

/// Select the clicked body and send the camera toward it.
fn resolve_pick_requests(
    mut requests: MessageReader<PickRequest>,
    mut cameras: Query<(Entity, &mut Transform, &Projection), With<MainCamera>>,
    surfaces: Query<(Entity, &GlobalTransform, &PickShape)>,
    settings: Res<CameraSettings>,
    mut registry: ResMut<SceneRegistry>,
    mut tweens: ResMut<Tweens>,
) {
    for request in requests.read() {
        let Ok((camera_entity, mut camera_transform, projection)) = cameras.single_mut() else {
            return;
        };
        let Projection::Perspective(perspective) = projection else {
            return;
        };
        let Some(ray) = camera_ray(&camera_transform, perspective, request.ndc) else {
            continue;
        };

        let Some(selection) = pick(ray, surfaces.iter(), &registry) else {
            continue;
        };

        registry.set_active(selection.index);
        camera::travel_to(
            camera_entity,
            &mut camera_transform,
            &selection,
            &mut tweens,
            &settings,
        );

        if let Some(instance) = registry.active_instance() {
            info!("Selected {}", instance.descriptor().name);
        }
    }
}
