//! Time-based interpolation of transform properties.
//!
//! A [`Tween`] moves the named axes of one property (translation or scale) of
//! one entity toward destination values. Tasks live in the [`Tweens`]
//! resource and are advanced once per frame by [`advance_tweens`].
//!
//! Two running tweens on the same property of the same entity are not
//! coordinated: both write every frame and the later-created one wins.

use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;

/// Plugin owning the tween task set.
pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Tweens>();
        // advance_tweens is scheduled by FramePlugin in the tween phase
    }
}

/// Transform property animated by a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    Translation,
    Scale,
}

impl TweenProperty {
    fn read(self, transform: &Transform) -> Vec3 {
        match self {
            TweenProperty::Translation => transform.translation,
            TweenProperty::Scale => transform.scale,
        }
    }

    fn write(self, transform: &mut Transform, value: Vec3) {
        match self {
            TweenProperty::Translation => transform.translation = value,
            TweenProperty::Scale => transform.scale = value,
        }
    }
}

/// The entity property a tween writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenTarget {
    pub entity: Entity,
    pub property: TweenProperty,
}

impl TweenTarget {
    pub fn translation(entity: Entity) -> Self {
        Self {
            entity,
            property: TweenProperty::Translation,
        }
    }

    pub fn scale(entity: Entity) -> Self {
        Self {
            entity,
            property: TweenProperty::Scale,
        }
    }
}

/// Per-axis destination values. Axes left as `None` are never written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisValues {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl AxisValues {
    /// Destination on all three axes.
    pub fn all(value: Vec3) -> Self {
        Self {
            x: Some(value.x),
            y: Some(value.y),
            z: Some(value.z),
        }
    }

    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = Some(z);
        self
    }

    /// Value at eased fraction `t` of the way from `start`.
    /// Unnamed axes keep their `current` value.
    fn interpolate(&self, start: Vec3, current: Vec3, t: f32) -> Vec3 {
        let axis = |to: Option<f32>, from: f32, now: f32| match to {
            Some(to) => from + (to - from) * t,
            None => now,
        };
        Vec3::new(
            axis(self.x, start.x, current.x),
            axis(self.y, start.y, current.y),
            axis(self.z, start.z, current.z),
        )
    }

    /// Exact destination, with unnamed axes taken from `current`.
    fn settle(&self, current: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(current.x),
            self.y.unwrap_or(current.y),
            self.z.unwrap_or(current.z),
        )
    }
}

/// Returned by an update callback to keep or stop its tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenControl {
    Continue,
    Stop,
}

/// Per-tick callback, invoked with the freshly written value.
pub type UpdateFn = Box<dyn FnMut(Vec3) -> TweenControl + Send + Sync>;

/// Handle to a scheduled tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

/// Description of one interpolation, built before scheduling.
pub struct Tween {
    target: TweenTarget,
    to: AxisValues,
    duration_ms: f64,
    delay_ms: f64,
    easing: EaseFunction,
    on_update: Option<UpdateFn>,
}

impl Tween {
    /// Linear tween with no delay. Negative or non-finite durations become zero.
    pub fn new(target: TweenTarget, to: AxisValues, duration_ms: f64) -> Self {
        Self {
            target,
            to,
            duration_ms: sanitize_ms(duration_ms),
            delay_ms: 0.0,
            easing: EaseFunction::Linear,
            on_update: None,
        }
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = sanitize_ms(delay_ms);
        self
    }

    pub fn easing(mut self, easing: EaseFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_update(
        mut self,
        callback: impl FnMut(Vec3) -> TweenControl + Send + Sync + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn target(&self) -> TweenTarget {
        self.target
    }

    pub fn destination(&self) -> AxisValues {
        self.to
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }
}

fn sanitize_ms(ms: f64) -> f64 {
    if ms.is_finite() && ms > 0.0 { ms } else { 0.0 }
}

/// Read/write access to the properties tweens animate.
pub trait TweenSubject {
    fn read(&self, target: TweenTarget) -> Option<Vec3>;
    fn write(&mut self, target: TweenTarget, value: Vec3);
}

/// [`TweenSubject`] backed by the world's transforms.
pub struct TransformSubject<'a, 'w, 's, 't>(pub &'a mut Query<'w, 's, &'t mut Transform>);

impl TweenSubject for TransformSubject<'_, '_, '_, '_> {
    fn read(&self, target: TweenTarget) -> Option<Vec3> {
        self.0
            .get(target.entity)
            .ok()
            .map(|transform| target.property.read(transform))
    }

    fn write(&mut self, target: TweenTarget, value: Vec3) {
        if let Ok(mut transform) = self.0.get_mut(target.entity) {
            target.property.write(&mut transform, value);
        }
    }
}

struct TweenTask {
    id: TweenId,
    tween: Tween,
    scheduled_at_ms: f64,
    /// Property value captured on the first tick after the delay.
    start: Option<Vec3>,
}

impl TweenTask {
    /// Advance to `now_ms`. Returns false once the task is finished.
    fn advance(&mut self, now_ms: f64, subject: &mut impl TweenSubject) -> bool {
        let elapsed = now_ms - self.scheduled_at_ms - self.tween.delay_ms;
        if elapsed < 0.0 {
            return true;
        }

        let target = self.tween.target;
        let Some(current) = subject.read(target) else {
            debug!("Dropping tween {:?}: target {:?} is gone", self.id, target.entity);
            return false;
        };
        let start = *self.start.get_or_insert(current);

        let fraction = if self.tween.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed / self.tween.duration_ms).min(1.0)
        };

        let value = if fraction >= 1.0 {
            self.tween.to.settle(current)
        } else {
            let eased = self.tween.easing.sample_clamped(fraction as f32);
            self.tween.to.interpolate(start, current, eased)
        };
        subject.write(target, value);

        if let Some(callback) = self.tween.on_update.as_mut() {
            if callback(value) == TweenControl::Stop {
                debug!("Tween {:?} stopped by its update callback", self.id);
                return false;
            }
        }

        fraction < 1.0
    }
}

/// The set of scheduled tweens.
///
/// Starts empty. Tweens are created against the engine clock, which is the
/// time passed to the most recent [`Tweens::advance_all`].
#[derive(Resource, Default)]
pub struct Tweens {
    tasks: Vec<TweenTask>,
    next_id: u64,
    now_ms: f64,
}

impl Tweens {
    /// Schedule a tween. Its delay counts from the current engine clock.
    pub fn create(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tasks.push(TweenTask {
            id,
            tween,
            scheduled_at_ms: self.now_ms,
            start: None,
        });
        id
    }

    /// Advance every task to `now_ms`, in creation order.
    pub fn advance_all(&mut self, now_ms: f64, subject: &mut impl TweenSubject) {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        self.tasks.retain_mut(|task| task.advance(now, &mut *subject));
    }

    /// Stop a tween. Values already written stay in place.
    pub fn stop(&mut self, id: TweenId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Cancel every tween. Returns how many were running.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        if cancelled > 0 {
            debug!("Cancelled {} tweens", cancelled);
        }
        cancelled
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Destination of a running tween.
    pub fn destination(&self, id: TweenId) -> Option<AxisValues> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.tween.to)
    }
}

/// Tween phase of the frame: advance every task against the transforms.
pub fn advance_tweens(
    time: Res<Time>,
    mut tweens: ResMut<Tweens>,
    mut transforms: Query<&mut Transform>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    tweens.advance_all(now_ms, &mut TransformSubject(&mut transforms));
}
