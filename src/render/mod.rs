//! Rendering systems for the solar system explorer.
//!
//! This module provides the visual representation of celestial bodies
//! and background elements.

mod background;
pub mod bodies;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;

// Re-export for use in other modules
pub use self::background::{Star, StarfieldSettings};
pub use self::bodies::{BodySurface, RingSurface};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, BackgroundPlugin));
    }
}
