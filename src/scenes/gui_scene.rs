use cgmath::Vector4 as Vec4;
use egui::Slider;

use crate::renderer::Renderer;
use crate::scenes::{DemoScene, FrameStats, SceneView};

/// GUI widget showcase. Draws no geometry; the chosen clear colour fills the
/// background.
pub struct GuiScene {
    pub show_demo_window: bool,
    pub show_another_window: bool,
    pub value: f32,
    pub clear_color: [f32; 3],
    pub counter: u32,
}

impl Default for GuiScene {
    fn default() -> Self {
        Self {
            show_demo_window: true,
            show_another_window: false,
            value: 0.0,
            clear_color: [0.45, 0.55, 0.60],
            counter: 0,
        }
    }
}

impl DemoScene for GuiScene {
    fn name(&self) -> &'static str {
        "GUI demo"
    }

    fn clear_colour(&self) -> Vec4<f32> {
        let [r, g, b] = self.clear_color;
        Vec4::new(r, g, b, 1.0)
    }

    fn draw(&mut self, _renderer: &mut Renderer, _view: &SceneView) {}

    fn ui(&mut self, ctx: &egui::Context, stats: &FrameStats) {
        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_demo_window, "Demo Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(Slider::new(&mut self.value, 0.0..=1.0).text("float"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut self.clear_color);
                ui.label("clear color");
            });

            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    self.counter += 1;
                }
                ui.label(format!("counter = {}", self.counter));
            });

            ui.label(format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                stats.delta_time * 1000.0,
                stats.fps
            ));
        });

        egui::Window::new("Demo Window")
            .open(&mut self.show_demo_window)
            .vscroll(true)
            .show(ctx, |ui| {
                ctx.settings_ui(ui);
            });

        let mut close_requested = false;
        egui::Window::new("Another Window")
            .open(&mut self.show_another_window)
            .show(ctx, |ui| {
                ui.label("Hello from another window!");
                close_requested = ui.button("Close Me").clicked();
            });
        if close_requested {
            self.show_another_window = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_colour_follows_the_editor() {
        let mut scene = GuiScene::default();
        scene.clear_color = [0.1, 0.2, 0.3];
        assert_eq!(scene.clear_colour(), Vec4::new(0.1, 0.2, 0.3, 1.0));
    }
}
