//! Orrery - Animated Solar System Explorer
//!
//! A library crate providing the scene, animation and interaction
//! components for testing and integration purposes.

pub mod camera;
pub mod catalog;
pub mod frame;
pub mod picking;
pub mod registry;
pub mod render;
pub mod tween;
pub mod ui;
