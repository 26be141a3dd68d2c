//! Settings structures for the viewer sidebar.

/// Navigation & viewport parameters.
#[derive(Debug, Clone)]
pub struct SettingsNavigation {
    pub fit_to_screen_enabled: bool,
    pub zoom_and_pan_enabled: bool,
    pub zoom_speed: f32,
    pub fit_to_screen_padding: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            // Mutually exclusive: only one should be true
            fit_to_screen_enabled: true,
            zoom_and_pan_enabled: false,
            zoom_speed: 0.02,
            fit_to_screen_padding: 0.05,
        }
    }
}

impl SettingsNavigation {
    /// Switch between auto-fit and manual zoom.
    pub fn toggle_mode(&mut self) {
        self.fit_to_screen_enabled = !self.fit_to_screen_enabled;
        self.zoom_and_pan_enabled = !self.fit_to_screen_enabled;
    }

    pub fn to_egui(&self) -> egui_graphs::SettingsNavigation {
        egui_graphs::SettingsNavigation::new()
            .with_fit_to_screen_enabled(self.fit_to_screen_enabled)
            .with_zoom_and_pan_enabled(self.zoom_and_pan_enabled)
            .with_zoom_speed(self.zoom_speed)
            .with_fit_to_screen_padding(self.fit_to_screen_padding)
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStyle {
    /// Always show node labels (vs hover-only).
    pub labels_always: bool,
    pub dragging_enabled: bool,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            labels_always: true,
            dragging_enabled: true,
        }
    }
}

impl SettingsStyle {
    /// Large networks read better without permanent labels.
    pub fn for_node_count(node_count: usize) -> Self {
        Self {
            labels_always: node_count <= 200,
            ..Self::default()
        }
    }
}
