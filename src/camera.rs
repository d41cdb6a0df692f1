//! Camera setup, travel toward selected bodies, and the zoom toggle.

use bevy::math::curve::EaseFunction;
use bevy::prelude::*;

use crate::frame::FramePhase;
use crate::registry::Selection;
use crate::tween::{AxisValues, Tween, TweenControl, TweenId, TweenTarget, Tweens};

/// Label shown while the camera is at its default distance.
pub const ZOOM_IN_LABEL: &str = "ZOOM IN";

/// Label shown while the camera is zoomed in.
pub const ZOOM_OUT_LABEL: &str = "ZOOM OUT";

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Camera tunables.
#[derive(Resource, Clone, Debug)]
pub struct CameraSettings {
    /// Camera z snapped to whenever a body is selected, and the default z.
    pub baseline_distance: f32,
    /// Camera z when zoomed in.
    pub zoomed_distance: f32,
    /// Travel stops once closer than this plus the body radius.
    pub min_approach_distance: f32,
    pub travel_duration_ms: f64,
    pub zoom_duration_ms: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            baseline_distance: 150.0,
            zoomed_distance: 90.0,
            min_approach_distance: 70.0,
            travel_duration_ms: 2000.0,
            zoom_duration_ms: 1000.0,
            fov_degrees: 35.0,
            near: 0.1,
            far: 210.0,
        }
    }
}

impl CameraSettings {
    pub fn projection(&self) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            ..default()
        }
    }
}

/// Zoom button state. The label is the only record of which way the next
/// toggle goes.
#[derive(Resource, Clone, Debug)]
pub struct ZoomControl {
    label: &'static str,
}

impl Default for ZoomControl {
    fn default() -> Self {
        Self {
            label: ZOOM_IN_LABEL,
        }
    }
}

impl ZoomControl {
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Request to flip the zoom toggle.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ToggleZoom;

/// Camera control without spawning a camera. Used on its own by headless apps.
pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<ZoomControl>()
            .add_message::<ToggleZoom>()
            .add_systems(Update, apply_zoom_toggles.before(FramePhase::Tween));
    }
}

/// Plugin providing the main camera and its controls.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraControlPlugin)
            .add_systems(Startup, setup_camera);
    }
}

/// Spawn the main perspective camera looking down -Z at the scene.
fn setup_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(settings.projection()),
        Transform::from_xyz(0.0, 0.0, settings.baseline_distance),
        MainCamera,
    ));
}

/// Send the camera toward a selected body.
///
/// The camera first jumps back to the baseline distance, then travels toward
/// the body and halts as soon as it is within the approach distance plus the
/// body's effective radius.
pub fn travel_to(
    camera: Entity,
    camera_transform: &mut Transform,
    selection: &Selection,
    tweens: &mut Tweens,
    settings: &CameraSettings,
) -> TweenId {
    camera_transform.translation.z = settings.baseline_distance;

    let target = selection.position;
    let stop_within = settings.min_approach_distance + selection.effective_radius;

    tweens.create(
        Tween::new(
            TweenTarget::translation(camera),
            AxisValues::all(target),
            settings.travel_duration_ms,
        )
        .on_update(move |position| {
            if position.distance(target) < stop_within {
                TweenControl::Stop
            } else {
                TweenControl::Continue
            }
        }),
    )
}

/// Flip the zoom toggle and animate the camera accordingly.
pub fn toggle_zoom(
    control: &mut ZoomControl,
    camera: Entity,
    tweens: &mut Tweens,
    settings: &CameraSettings,
) -> TweenId {
    let (destination, next_label) = if control.label == ZOOM_IN_LABEL {
        (
            AxisValues::default()
                .with_x(0.0)
                .with_z(settings.zoomed_distance),
            ZOOM_OUT_LABEL,
        )
    } else {
        (
            AxisValues::default().with_z(settings.baseline_distance),
            ZOOM_IN_LABEL,
        )
    };
    control.label = next_label;

    tweens.create(
        Tween::new(
            TweenTarget::translation(camera),
            destination,
            settings.zoom_duration_ms,
        )
        .easing(EaseFunction::QuadraticInOut),
    )
}

fn apply_zoom_toggles(
    mut toggles: MessageReader<ToggleZoom>,
    cameras: Query<Entity, With<MainCamera>>,
    settings: Res<CameraSettings>,
    mut control: ResMut<ZoomControl>,
    mut tweens: ResMut<Tweens>,
) {
    for _ in toggles.read() {
        let Ok(camera) = cameras.single() else {
            warn!("Zoom toggled without a main camera");
            return;
        };
        toggle_zoom(&mut control, camera, &mut tweens, &settings);
        debug!("Zoom toggled, button now reads {}", control.label());
    }
}
