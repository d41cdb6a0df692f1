//! Static descriptive data for the bodies shown in the scene.
//!
//! The catalog is validated once at startup. A malformed entry aborts the
//! program before any entity is spawned.

use std::collections::HashSet;

use bevy::prelude::*;

/// Inner radius of the ring annulus in render units.
/// Not derived from the owning body's radius.
pub const RING_INNER_RADIUS: f32 = 4.0;

/// Outer radius of the ring annulus in render units.
pub const RING_OUTER_RADIUS: f32 = 4.8;

/// Errors raised while validating catalog entries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("body '{0}' appears more than once")]
    DuplicateName(String),

    #[error("body '{name}' has invalid radius {radius} (must be positive)")]
    InvalidRadius { name: String, radius: f32 },

    #[error("body '{name}' has invalid rotation speed {speed} (must be non-negative)")]
    InvalidSpeed { name: String, speed: f32 },

    #[error("body '{name}' has a non-finite position")]
    InvalidPosition { name: String },

    #[error("body '{name}' has invalid ring radii [{inner}, {outer}]")]
    InvalidRing { name: String, inner: f32, outer: f32 },
}

/// Ring attached to a body.
#[derive(Clone, Debug, PartialEq)]
pub struct RingDescriptor {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Alpha texture path, relative to the asset root.
    pub texture: &'static str,
}

/// Immutable description of one celestial body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    /// Unique display name.
    pub name: &'static str,
    pub description: &'static str,
    /// Sphere radius in render units.
    pub radius: f32,
    /// Base position in render units. Bodies never move from here.
    pub position: Vec3,
    /// Self-rotation speed, scaled by the per-frame rotation factor.
    pub speed: f32,
    /// Surface texture path, relative to the asset root.
    pub texture: &'static str,
    pub ring: Option<RingDescriptor>,
}

impl BodyDescriptor {
    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }

    /// Check a single entry. Name uniqueness is checked by [`Catalog::new`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CatalogError::InvalidRadius {
                name: self.name.to_string(),
                radius: self.radius,
            });
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(CatalogError::InvalidSpeed {
                name: self.name.to_string(),
                speed: self.speed,
            });
        }
        if !self.position.is_finite() {
            return Err(CatalogError::InvalidPosition {
                name: self.name.to_string(),
            });
        }
        if let Some(ring) = &self.ring {
            let ordered = ring.inner_radius > 0.0 && ring.outer_radius > ring.inner_radius;
            if !(ordered && ring.outer_radius.is_finite()) {
                return Err(CatalogError::InvalidRing {
                    name: self.name.to_string(),
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered collection of body descriptors.
#[derive(Resource, Clone, Debug)]
pub struct Catalog {
    bodies: Vec<BodyDescriptor>,
}

impl Catalog {
    /// Validate every entry and build the catalog.
    pub fn new(bodies: Vec<BodyDescriptor>) -> Result<Self, CatalogError> {
        if bodies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for body in &bodies {
            body.validate()?;
            if !seen.insert(body.name) {
                return Err(CatalogError::DuplicateName(body.name.to_string()));
            }
        }

        Ok(Self { bodies })
    }

    /// The built-in Sun + eight planets catalog.
    pub fn solar_system() -> Result<Self, CatalogError> {
        Self::new(solar_system_bodies())
    }

    /// Descriptors in catalog order.
    pub fn list(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn planet(
    name: &'static str,
    description: &'static str,
    radius: f32,
    position: Vec3,
    texture: &'static str,
) -> BodyDescriptor {
    BodyDescriptor {
        name,
        description,
        radius,
        position,
        speed: 1.0,
        texture,
        ring: None,
    }
}

/// Raw entries for the built-in catalog, ordered outward from the Sun.
pub fn solar_system_bodies() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor {
            name: "Sun",
            description: "The heart of our solar system, and it has radius of 435,000 miles (700,000KM)",
            radius: 12.0,
            position: Vec3::ZERO,
            speed: 0.1,
            texture: "textures/2k_sun.jpg",
            ring: None,
        },
        planet(
            "Mercury",
            "Mercury is the closest planet to the Sun, and the smallest planet in our solar system",
            0.5,
            Vec3::new(14.0, -0.75, 0.0),
            "textures/2k_mercury.jpg",
        ),
        planet(
            "Venus",
            "Venus has a thick atmosphere that traps heat, making it the hottest planet in our solar system",
            1.0,
            Vec3::new(16.5, -0.85, 0.0),
            "textures/2k_venus_surface.jpg",
        ),
        planet(
            "Earth",
            "Our home planet, the only planet known to be inhabited by living things",
            1.5,
            Vec3::new(20.5, -0.85, 0.0),
            "textures/2k_earth_daymap.jpg",
        ),
        planet(
            "Mars",
            "The only planet we know of inhabited entirely by robots",
            0.75,
            Vec3::new(23.5, -0.85, 0.0),
            "textures/2k_mars.jpg",
        ),
        planet(
            "Jupiter",
            "Jupiter is, by far, the largest planet in the solar system, more than twice as massive as all the other planets combined",
            5.0,
            Vec3::new(30.75, -0.85, 0.0),
            "textures/2k_jupiter.jpg",
        ),
        BodyDescriptor {
            ring: Some(RingDescriptor {
                inner_radius: RING_INNER_RADIUS,
                outer_radius: RING_OUTER_RADIUS,
                texture: "textures/2k_saturn_ring_alpha.png",
            }),
            ..planet(
                "Saturn",
                "Saturn is the sixth planet from the Sun and the second largest planet in our solar system",
                3.5,
                Vec3::new(41.75, -0.85, 0.0),
                "textures/2k_saturn.jpg",
            )
        },
        planet(
            "Uranus",
            "Uranus is a very cold and windy planet, blue-green in color due to large amounts of methane",
            0.75,
            Vec3::new(49.0, -0.85, 0.0),
            "textures/2k_uranus.jpg",
        ),
        planet(
            "Neptune",
            "The first planet discovered with math, using predictions sent by French astronomer Urbain Le Verrier",
            0.75,
            Vec3::new(52.0, -0.85, 0.0),
            "textures/2k_neptune.jpg",
        ),
    ]
}
