//! UI module providing the egui-based info panel.

mod info_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::frame::FramePhase;

pub use info_panel::{bind_info_panel, InfoPanel};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanel>()
            // The binder reads the selection settled during this frame
            .add_systems(Update, bind_info_panel.after(FramePhase::Tween))
            .add_systems(EguiPrimaryContextPass, info_panel::info_panel);
    }
}
