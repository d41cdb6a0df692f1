//! Live collection of instantiated bodies and their selection state.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::catalog::{BodyDescriptor, Catalog};
use crate::render::bodies;
use crate::tween::{AxisValues, Tween, TweenTarget, Tweens};

/// Plugin owning the scene registry and spawning the bodies at startup.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneRegistry>()
            .init_resource::<SceneSettings>()
            .add_systems(Startup, spawn_scene);
    }
}

/// Entrance animation settings.
#[derive(Resource, Clone, Debug)]
pub struct SceneSettings {
    /// Duration of each body's scale-in, in milliseconds.
    pub entrance_duration_ms: f64,
    /// Extra delay per catalog position, in milliseconds.
    pub entrance_stagger_ms: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            entrance_duration_ms: 1000.0,
            entrance_stagger_ms: 200.0,
        }
    }
}

/// Entities making up one body's visual representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyVisual {
    /// A lone sphere, positioned and scaled directly.
    Single { surface: Entity },
    /// Sphere and ring bundled under a group entity. Only the group is
    /// positioned and scaled; the sphere spins inside it.
    Ringed {
        group: Entity,
        body: Entity,
        ring: Entity,
    },
}

impl BodyVisual {
    /// Entity carrying the base position and the entrance scale.
    pub fn root(&self) -> Entity {
        match *self {
            BodyVisual::Single { surface } => surface,
            BodyVisual::Ringed { group, .. } => group,
        }
    }

    /// The sphere surface of the body itself.
    pub fn body_surface(&self) -> Entity {
        match *self {
            BodyVisual::Single { surface } => surface,
            BodyVisual::Ringed { body, .. } => body,
        }
    }

    /// Every entity that belongs to this representation.
    pub fn entities(&self) -> Vec<Entity> {
        match *self {
            BodyVisual::Single { surface } => vec![surface],
            BodyVisual::Ringed { group, body, ring } => vec![group, body, ring],
        }
    }
}

/// Runtime state of one catalog entry.
#[derive(Clone, Debug)]
pub struct BodyInstance {
    descriptor: BodyDescriptor,
    visual: BodyVisual,
    active: bool,
}

impl BodyInstance {
    pub fn new(descriptor: BodyDescriptor, visual: BodyVisual) -> Self {
        Self {
            descriptor,
            visual,
            active: false,
        }
    }

    pub fn descriptor(&self) -> &BodyDescriptor {
        &self.descriptor
    }

    pub fn visual(&self) -> BodyVisual {
        self.visual
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// World position of the body. Bodies never leave their base position.
    pub fn position(&self) -> Vec3 {
        self.descriptor.position
    }

    /// Radius used for camera approach distances. Always the sphere's own
    /// radius, even when a ring surrounds it.
    pub fn effective_radius(&self) -> f32 {
        self.descriptor.radius
    }
}

/// Outcome of resolving a picked surface to its owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Index of the owning instance in catalog order.
    pub index: usize,
    pub position: Vec3,
    pub effective_radius: f32,
}

/// Ordered body instances plus reverse lookup and active selection.
#[derive(Resource, Default, Debug)]
pub struct SceneRegistry {
    instances: Vec<BodyInstance>,
    by_entity: HashMap<Entity, usize>,
    active: Option<usize>,
}

impl SceneRegistry {
    /// Build every catalog entry and schedule its staggered entrance.
    pub fn generate(
        &mut self,
        catalog: &Catalog,
        commands: &mut Commands,
        tweens: &mut Tweens,
        settings: &SceneSettings,
    ) -> &[BodyInstance] {
        for (index, descriptor) in catalog.list().iter().enumerate() {
            let instance = bodies::build(commands, descriptor);
            tweens.create(
                Tween::new(
                    TweenTarget::scale(instance.visual().root()),
                    AxisValues::all(Vec3::ONE),
                    settings.entrance_duration_ms,
                )
                .delay(settings.entrance_stagger_ms * index as f64),
            );
            self.insert(instance);
        }
        &self.instances
    }

    /// Append an instance and register all of its entities for lookup.
    pub fn insert(&mut self, instance: BodyInstance) -> usize {
        let index = self.instances.len();
        for entity in instance.visual.entities() {
            self.by_entity.insert(entity, index);
        }
        self.instances.push(instance);
        index
    }

    /// Make `index` the only active instance. Out-of-range indices leave the
    /// selection untouched.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.instances.len() {
            return false;
        }
        for (i, instance) in self.instances.iter_mut().enumerate() {
            instance.active = i == index;
        }
        self.active = Some(index);
        true
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_instance(&self) -> Option<&BodyInstance> {
        self.active.and_then(|index| self.instances.get(index))
    }

    /// Resolve any entity of a representation to its owning instance.
    pub fn resolve(&self, entity: Entity) -> Option<Selection> {
        let index = *self.by_entity.get(&entity)?;
        let instance = self.instances.get(index)?;

        let owned = match instance.visual {
            BodyVisual::Single { surface } => surface == entity,
            BodyVisual::Ringed { group, body, ring } => {
                entity == group || entity == body || entity == ring
            }
        };
        if !owned {
            return None;
        }

        Some(Selection {
            index,
            position: instance.position(),
            effective_radius: instance.effective_radius(),
        })
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn get(&self, index: usize) -> Option<&BodyInstance> {
        self.instances.get(index)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Spawn every catalog body at startup.
pub fn spawn_scene(
    mut commands: Commands,
    catalog: Option<Res<Catalog>>,
    settings: Res<SceneSettings>,
    mut registry: ResMut<SceneRegistry>,
    mut tweens: ResMut<Tweens>,
) {
    let Some(catalog) = catalog else {
        error!("No body catalog loaded, scene left empty");
        return;
    };

    let count = registry
        .generate(&catalog, &mut commands, &mut tweens, &settings)
        .len();
    info!("Spawned {} celestial bodies", count);
}
