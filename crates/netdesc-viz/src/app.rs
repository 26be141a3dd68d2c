//! Node-link viewer for a single network.

use eframe::App;
use egui::{CollapsingHeader, Context};
use egui_graphs::{
    FruchtermanReingoldWithCenterGravity, FruchtermanReingoldWithCenterGravityState, Graph,
    GraphView, LayoutForceDirected,
};
use petgraph::stable_graph::StableGraph;
use petgraph::EdgeType;

use netdesc_core::Vertex;

use crate::settings::{SettingsNavigation, SettingsStyle};

// Type aliases for Force-Directed layout with Center Gravity
type ForceLayout = LayoutForceDirected<FruchtermanReingoldWithCenterGravity>;
type ForceState = FruchtermanReingoldWithCenterGravityState;

/// Half-width of the square initial positions are spread over.
const SPREAD: f32 = 200.0;

/// Viewer window state, generic over edge direction.
pub struct NetworkViewerApp<Ty: EdgeType> {
    g: Graph<(), (), Ty>,
    name: String,
    directed: bool,
    settings_navigation: SettingsNavigation,
    settings_style: SettingsStyle,
    show_sidebar: bool,
}

impl<Ty: EdgeType> NetworkViewerApp<Ty> {
    /// Build the view of `graph`.
    ///
    /// Vertices keep their file coordinates when present, the rest start at
    /// pseudo-random positions; the force layout takes over from there.
    pub fn new(name: &str, graph: &StableGraph<Vertex, f64, Ty>) -> Self {
        let skeleton: StableGraph<(), (), Ty> = graph.map(|_, _| (), |_, _| ());
        let mut g = Graph::from(&skeleton);
        let mut seed = Jitter::default();

        for idx in graph.node_indices() {
            let Some(vertex) = graph.node_weight(idx) else {
                continue;
            };
            if let Some(node) = g.node_mut(idx) {
                let location = match vertex.position {
                    Some((x, y)) => egui::Pos2::new(
                        (x as f32 - 0.5) * SPREAD * 2.0,
                        (y as f32 - 0.5) * SPREAD * 2.0,
                    ),
                    None => egui::Pos2::new(seed.next_offset(), seed.next_offset()),
                };
                node.set_location(location);
                node.set_label(vertex.label.clone());
            }
        }

        Self {
            g,
            name: name.to_string(),
            directed: Ty::is_directed(),
            settings_navigation: SettingsNavigation::default(),
            settings_style: SettingsStyle::for_node_count(graph.node_count()),
            show_sidebar: true,
        }
    }

    fn ui_info(&self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Network")
            .default_open(true)
            .show(ui, |ui| {
                ui.label(format!("Name: {}", self.name));
                ui.label(if self.directed { "Directed" } else { "Undirected" });
                ui.label(format!("Nodes: {}", self.g.node_count()));
                ui.label(format!("Edges: {}", self.g.edge_count()));
            });
    }

    fn ui_navigation(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Navigation")
            .default_open(true)
            .show(ui, |ui| {
                let mut fit = self.settings_navigation.fit_to_screen_enabled;
                if ui.checkbox(&mut fit, "fit_to_screen").clicked() {
                    self.settings_navigation.toggle_mode();
                }
                ui.add_enabled_ui(self.settings_navigation.zoom_and_pan_enabled, |ui| {
                    ui.add(
                        egui::Slider::new(&mut self.settings_navigation.zoom_speed, 0.01..=2.0)
                            .text("zoom_speed"),
                    );
                });
            });
    }

    fn ui_layout(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Layout")
            .default_open(true)
            .show(ui, |ui| {
                let mut state = egui_graphs::get_layout_state::<ForceState>(ui, None);

                ui.checkbox(&mut state.base.is_running, "running");
                ui.add(egui::Slider::new(&mut state.base.dt, 0.001..=0.2).text("dt"));
                ui.add(egui::Slider::new(&mut state.base.c_repulse, 0.1..=3.0).text("c_repulse"));
                ui.checkbox(&mut state.extras.0.enabled, "center gravity");

                egui_graphs::set_layout_state::<ForceState>(ui, state, None);
            });
    }

    fn ui_style(&mut self, ui: &mut egui::Ui) {
        CollapsingHeader::new("Style").show(ui, |ui| {
            ui.checkbox(&mut self.settings_style.labels_always, "labels_always");
            ui.checkbox(&mut self.settings_style.dragging_enabled, "dragging");
        });
    }
}

impl<Ty: EdgeType> App for NetworkViewerApp<Ty> {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Tab) {
                self.show_sidebar = !self.show_sidebar;
            }
        });

        if self.show_sidebar {
            egui::SidePanel::right("right_panel")
                .default_width(240.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.heading(format!("Network: {}", self.name));
                        ui.separator();

                        self.ui_info(ui);
                        ui.separator();

                        self.ui_navigation(ui);
                        ui.separator();

                        self.ui_layout(ui);
                        ui.separator();

                        self.ui_style(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let settings_interaction = egui_graphs::SettingsInteraction::new()
                .with_dragging_enabled(self.settings_style.dragging_enabled)
                .with_hover_enabled(true);
            let settings_navigation = self.settings_navigation.to_egui();
            let settings_style =
                egui_graphs::SettingsStyle::new().with_labels_always(self.settings_style.labels_always);

            ui.add(
                &mut GraphView::<_, _, _, _, _, _, ForceState, ForceLayout>::new(&mut self.g)
                    .with_interactions(&settings_interaction)
                    .with_navigations(&settings_navigation)
                    .with_styles(&settings_style),
            );
        });
    }
}

/// Deterministic xorshift offsets for nodes without coordinates.
struct Jitter(u64);

impl Default for Jitter {
    fn default() -> Self {
        Self(12345)
    }
}

impl Jitter {
    /// Offset in `[-SPREAD, SPREAD]`.
    fn next_offset(&mut self) -> f32 {
        let mut s = self.0;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.0 = s;
        let unit = (s as f32) / (u64::MAX as f32);
        (unit - 0.5) * SPREAD * 2.0
    }
}
