//! Info panel showing the active body and the zoom toggle.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::{ToggleZoom, ZoomControl};
use crate::catalog::BodyDescriptor;
use crate::picking::PointerOverUi;
use crate::registry::SceneRegistry;

/// Text currently shown in the info panel.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct InfoPanel {
    pub title: String,
    pub description: String,
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            description: "Click a body to travel toward it.".to_string(),
        }
    }
}

impl InfoPanel {
    /// Show a body's name and description. Returns false if already shown.
    pub fn show(&mut self, descriptor: &BodyDescriptor) -> bool {
        if self.title == descriptor.name && self.description == descriptor.description {
            return false;
        }
        self.title = descriptor.name.to_string();
        self.description = descriptor.description.to_string();
        true
    }
}

/// Mirror the active body into the panel. With nothing active the panel
/// keeps whatever it showed last.
pub fn bind_info_panel(registry: Res<SceneRegistry>, mut panel: ResMut<InfoPanel>) {
    let Some(active) = registry.active_instance() else {
        return;
    };
    if panel.title == active.descriptor().name {
        return;
    }
    panel.show(active.descriptor());
}

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    panel: Res<InfoPanel>,
    zoom: Res<ZoomControl>,
    mut toggles: MessageWriter<ToggleZoom>,
    mut pointer_over_ui: ResMut<PointerOverUi>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("info")
        .title_bar(false)
        .resizable(false)
        .default_width(260.0)
        .anchor(egui::Align2::LEFT_BOTTOM, [16.0, -16.0])
        .show(ctx, |ui| {
            ui.heading(panel.title.as_str());
            ui.add_space(4.0);
            ui.label(panel.description.as_str());
            ui.add_space(8.0);

            if ui.button(zoom.label()).clicked() {
                toggles.write(ToggleZoom);
            }
        });

    pointer_over_ui.0 = ctx.is_pointer_over_area();
}
