pub mod gui_scene;
pub mod model_scene;

use cgmath::{Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};

use crate::projection::FovMode;
use crate::renderer::Renderer;

/// Per-frame view state handed to a scene's draw call.
#[derive(Debug, Clone, Copy)]
pub struct SceneView {
    pub view: Mat4<f32>,
    pub perspective: Mat4<f32>,
    pub ortho: Mat4<f32>,
    pub camera_pos: Vec3<f32>,
    pub width: usize,
    pub height: usize,
}

/// Numbers the GUI panels report.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub fps: f64,
    /// Seconds.
    pub delta_time: f32,
    /// Degrees, x = pitch, y = yaw.
    pub camera_rotation: Vec3<f32>,
    pub fov_mode: FovMode,
    pub hfov_degs: f32,
}

pub trait DemoScene {
    fn name(&self) -> &'static str;

    fn clear_colour(&self) -> Vec4<f32> {
        Vec4::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Advances animation by `delta_time` seconds.
    fn update(&mut self, _delta_time: f32) {}

    fn draw(&mut self, renderer: &mut Renderer, view: &SceneView);

    fn ui(&mut self, ctx: &egui::Context, stats: &FrameStats);
}

/// Index of the active scene. Stepping past either end stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSelector {
    current: usize,
    count: usize,
}

impl SceneSelector {
    pub fn new(count: usize, start: usize) -> Self {
        Self {
            current: start.min(count.saturating_sub(1)),
            count,
        }
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Returns true when the scene changed.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.count {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }
}
