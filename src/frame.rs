//! Per-frame update loop.
//!
//! Every frame runs three phases in a fixed order: body self-rotation, the
//! ambient star pulse, then the tween engine. Presentation is left to bevy's
//! render schedule. Pointer handling runs before the rotation phase.

use bevy::prelude::*;

use crate::tween::advance_tweens;

/// Phases of one frame, chained in declaration order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FramePhase {
    /// Spin every body surface.
    Rotation,
    /// Cosmetic, time-driven effects.
    Ambient,
    /// Advance running tweens.
    Tween,
}

/// Plugin wiring the frame phases.
pub struct FramePlugin;

impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameSettings>()
            .init_resource::<StarfieldPulse>()
            .configure_sets(
                Update,
                (FramePhase::Rotation, FramePhase::Ambient, FramePhase::Tween).chain(),
            )
            .add_systems(Update, rotate_bodies.in_set(FramePhase::Rotation))
            .add_systems(Update, pulse_starfield.in_set(FramePhase::Ambient))
            .add_systems(Update, advance_tweens.in_set(FramePhase::Tween));
    }
}

/// Tunables for the frame loop.
#[derive(Resource, Clone, Debug)]
pub struct FrameSettings {
    /// Radians per frame per unit of body speed.
    pub rotation_factor: f32,
    /// Star point size around which the pulse oscillates.
    pub star_base_size: f32,
    /// Pulse amplitude added to and removed from the base size.
    pub star_pulse_amplitude: f32,
    /// Pulse angular rate in radians per second.
    pub star_pulse_rate: f64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            rotation_factor: 0.001,
            star_base_size: 0.2,
            star_pulse_amplitude: 0.1,
            star_pulse_rate: 1.0,
        }
    }
}

/// Accumulated self-rotation about the local Y axis.
///
/// Only body spheres carry this. A ring and its group never spin.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct SelfRotation {
    /// Rotation speed taken from the body descriptor.
    pub speed: f32,
    /// Current angle in radians.
    pub angle: f32,
}

impl SelfRotation {
    pub fn new(speed: f32) -> Self {
        Self { speed, angle: 0.0 }
    }
}

/// Current star point size, recomputed every frame.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct StarfieldPulse {
    pub point_size: f32,
}

impl Default for StarfieldPulse {
    fn default() -> Self {
        Self {
            point_size: FrameSettings::default().star_base_size,
        }
    }
}

/// Star point size after `elapsed_secs` of wall-clock time.
pub fn star_point_size(elapsed_secs: f64, settings: &FrameSettings) -> f32 {
    let phase = (elapsed_secs * settings.star_pulse_rate).sin() as f32;
    settings.star_base_size + phase * settings.star_pulse_amplitude
}

/// Rotation phase: advance every spinning surface by one frame step.
pub fn rotate_bodies(
    settings: Res<FrameSettings>,
    mut bodies: Query<(&mut SelfRotation, &mut Transform)>,
) {
    for (mut spin, mut transform) in &mut bodies {
        spin.angle += spin.speed * settings.rotation_factor;
        transform.rotation = Quat::from_rotation_y(spin.angle);
    }
}

/// Ambient phase: recompute the star pulse from elapsed time.
pub fn pulse_starfield(
    time: Res<Time>,
    settings: Res<FrameSettings>,
    mut pulse: ResMut<StarfieldPulse>,
) {
    pulse.point_size = star_point_size(time.elapsed_secs_f64(), &settings);
}
