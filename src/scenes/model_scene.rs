use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4 as Mat4, Rad, SquareMatrix, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};
use egui::Slider;
use log::debug;

use crate::config::{ModelConfig, QuadConfig};
use crate::grid::Grid;
use crate::line::{Line, Point};
use crate::model::Model;
use crate::renderer::fragment_shader::{PhongShader, TextureShader};
use crate::renderer::{Light, RenderState, Renderer, Transforms};
use crate::scenes::{DemoScene, FrameStats, SceneView};
use crate::texture::Texture;
use crate::vertex::{Triangle, Vertex};

const GRID_SIZE: f32 = 500.0;
const GRID_HEIGHT: f32 = 50.0;
const GRID_DIVISIONS: usize = 20;
const AXIS_LENGTH: f32 = 20.0;
const MAX_ROTATION_SPEED: f32 = 5.0;

/// Which texture the spinning quad shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadSide {
    /// Turned away from the viewer; drawn rotated a further half turn.
    Front,
    Back,
}

/// Model matrix of the spinning quad in the top-right corner of a `width`
/// wide orthographic view, `time` seconds in.
pub fn quad_transform(width: f32, size: f32, time: f32) -> (Mat4<f32>, QuadSide) {
    let model = Mat4::from_translation(Vec3::new(width - size, size, -size))
        * Mat4::from_angle_y(Rad(-time * 2.0));

    let x_axis = (model * Vec4::unit_x()).truncate();
    let y_axis = (model * Vec4::unit_y()).truncate();
    let normal = x_axis.cross(y_axis);

    if normal.dot(Vec3::unit_z()) < 0.0 {
        (model * Mat4::from_angle_y(Rad(PI)), QuadSide::Front)
    } else {
        (model, QuadSide::Back)
    }
}

/// Model rotation from per-axis angles in radians, applied X first, then Y,
/// then Z.
pub fn model_rotation(angles: Vec3<f32>) -> Mat4<f32> {
    Mat4::from_angle_z(Rad(angles.z)) * Mat4::from_angle_y(Rad(angles.y)) * Mat4::from_angle_x(Rad(angles.x))
}

fn quad_triangles(size: f32) -> [Triangle; 2] {
    let corner = |x: f32, y: f32, u: f32, v: f32| Vertex::textured(Vec3::new(x * size, y * size, 0.0), Vec2::new(u, v));
    let bottom_left = corner(-1.0, -1.0, 0.0, 0.0);
    let bottom_right = corner(1.0, -1.0, 1.0, 0.0);
    let top_left = corner(-1.0, 1.0, 0.0, 1.0);
    let top_right = corner(1.0, 1.0, 1.0, 1.0);
    [
        Triangle::new(bottom_left, bottom_right, top_left),
        Triangle::new(bottom_right, top_right, top_left),
    ]
}

/// Grids, the loaded model, axes and a textured quad, with a details panel.
pub struct ModelScene {
    lower_grid: Grid,
    upper_grid: Grid,
    axes: [Line; 3],
    triangles: Vec<Triangle>,
    points: Vec<Point>,
    shader: PhongShader,
    /// Radians around X, Y and Z.
    rotation: Vec3<f32>,
    /// Radians per second around X, Y and Z.
    pub rotation_speed: [f32; 3],
    quad: [Triangle; 2],
    quad_size: f32,
    front_texture: Texture,
    back_texture: Texture,
    time: f32,
}

impl ModelScene {
    pub fn new(model: &Model, model_config: &ModelConfig, quad_config: &QuadConfig, light: Light) -> Self {
        let triangles = model.triangles();
        let points = if triangles.is_empty() {
            model
                .points()
                .into_iter()
                .map(|p| Point::new(p, Vec4::new(1.0, 1.0, 1.0, 1.0), 3.0))
                .collect()
        } else {
            Vec::new()
        };
        debug!(
            "Model scene: {} triangles, {} points",
            triangles.len(),
            points.len()
        );

        let flip = quad_config.flip_textures;
        let front_texture = Texture::load_or_else(quad_config.front_texture.as_deref(), flip, || {
            Texture::mandelbrot(256, 256)
        })
        .with_wrap(quad_config.texture_wrap);
        let back_texture = Texture::load_or_else(quad_config.back_texture.as_deref(), flip, || {
            Texture::checkerboard(256, 256, 32, [230, 120, 40, 255], [30, 30, 30, 255])
        })
        .with_wrap(quad_config.texture_wrap);

        Self {
            lower_grid: Grid::new(GRID_SIZE, GRID_SIZE, -GRID_HEIGHT, GRID_DIVISIONS),
            upper_grid: Grid::new(GRID_SIZE, GRID_SIZE, GRID_HEIGHT, GRID_DIVISIONS),
            axes: Line::axes(AXIS_LENGTH, 2.0),
            triangles,
            points,
            shader: PhongShader::new(light),
            rotation: Vec3::new(0.0, 0.0, 0.0),
            rotation_speed: model_config.rotation_speed,
            quad: quad_triangles(quad_config.size),
            quad_size: quad_config.size,
            front_texture,
            back_texture,
            time: 0.0,
        }
    }

    fn draw_quad(&self, renderer: &mut Renderer, view: &SceneView) {
        let (model, side) = quad_transform(view.width as f32, self.quad_size, self.time);
        let texture = match side {
            QuadSide::Front => &self.front_texture,
            QuadSide::Back => &self.back_texture,
        };
        let transforms = Transforms {
            model,
            view: Mat4::identity(),
            projection: view.ortho,
            camera_pos: Vec3::new(0.0, 0.0, 0.0),
        };
        renderer.draw_triangles(
            &self.quad,
            &transforms,
            &TextureShader,
            Some(texture),
            RenderState {
                depth_test: false,
                cull_back_faces: false,
            },
        );
    }
}

impl DemoScene for ModelScene {
    fn name(&self) -> &'static str {
        "Model demo"
    }

    fn update(&mut self, delta_time: f32) {
        self.time += delta_time;
        self.rotation += Vec3::from(self.rotation_speed) * delta_time;
    }

    fn draw(&mut self, renderer: &mut Renderer, view: &SceneView) {
        let view_projection = view.perspective * view.view;

        for grid in [&self.lower_grid, &self.upper_grid] {
            renderer.draw_lines(grid.lines(), &view_projection, grid.colour, 1.0, RenderState::default());
        }

        let transforms = Transforms {
            model: model_rotation(self.rotation),
            view: view.view,
            projection: view.perspective,
            camera_pos: view.camera_pos,
        };
        if self.triangles.is_empty() {
            let mvp = transforms.view_projection() * transforms.model;
            renderer.draw_points(&self.points, &mvp);
        } else {
            renderer.draw_triangles(&self.triangles, &transforms, &self.shader, None, RenderState::default());
        }

        for axis in &self.axes {
            renderer.draw_line(axis, &view_projection);
        }

        self.draw_quad(renderer, view);
    }

    fn ui(&mut self, ctx: &egui::Context, stats: &FrameStats) {
        egui::Window::new("Details / Settings")
            .default_pos([20.0, 20.0])
            .default_size([400.0, 270.0])
            .show(ctx, |ui| {
                let degs = stats.camera_rotation;
                let rads = degs.map(f32::to_radians);

                ui.heading("Details");
                ui.separator();
                ui.label(format!("FPS: {:.1}", stats.fps));
                ui.label(format!("Cam Rot (Degs): X {:.2}, Y {:.2}", degs.x, degs.y));
                ui.label(format!("Cam Rot (Rads): X {:.4}, Y {:.4}", rads.x, rads.y));
                ui.label(format!("SinXRot: {:.4}  CosXRot: {:.4}", rads.x.sin(), rads.x.cos()));
                ui.label(format!("SinYRot: {:.4}  CosYRot: {:.4}", rads.y.sin(), rads.y.cos()));
                ui.label(format!("FoV: {} {:.1} degs", stats.fov_mode.label(), stats.hfov_degs));

                ui.heading("Sliders");
                ui.separator();
                let range = -MAX_ROTATION_SPEED..=MAX_ROTATION_SPEED;
                for (speed, label) in self.rotation_speed.iter_mut().zip(["X Rot Speed", "Y Rot Speed", "Z Rot Speed"]) {
                    ui.add(Slider::new(speed, range.clone()).text(label));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_starts_facing_the_viewer() {
        let (model, side) = quad_transform(1280.0, 50.0, 0.0);
        assert_eq!(side, QuadSide::Back);
        let centre = model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(centre.truncate(), Vec3::new(1230.0, 50.0, -50.0));
    }

    #[test]
    fn turned_away_quad_is_flipped_to_face_the_viewer() {
        let (model, side) = quad_transform(800.0, 50.0, PI / 2.0);
        assert_eq!(side, QuadSide::Front);
        let x_axis = (model * Vec4::unit_x()).truncate();
        let y_axis = (model * Vec4::unit_y()).truncate();
        assert!(x_axis.cross(y_axis).dot(Vec3::unit_z()) > 0.0);
    }

    #[test]
    fn rotation_applies_x_before_z() {
        let m = model_rotation(Vec3::new(PI / 2.0, 0.0, PI / 2.0));
        // X turns +Y into +Z, which Z leaves alone
        let v = (m * Vec4::new(0.0, 1.0, 0.0, 0.0)).truncate();
        assert!((v - Vec3::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn quad_textures_use_the_configured_wrap() {
        let data = crate::model::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".as_bytes()).unwrap();
        let model = Model::from_obj(&data, crate::model::DrawingMethod::Arrays).unwrap();
        let quad_config = QuadConfig {
            texture_wrap: crate::texture::WrapMode::Repeat,
            ..QuadConfig::default()
        };
        let scene = ModelScene::new(&model, &ModelConfig::default(), &quad_config, Light::default());
        assert_eq!(scene.front_texture.wrap, crate::texture::WrapMode::Repeat);
        assert_eq!(scene.back_texture.wrap, crate::texture::WrapMode::Repeat);
        assert_eq!(scene.triangles.len(), 1);
    }

    #[test]
    fn quad_uvs_cover_the_texture() {
        let [a, b] = quad_triangles(10.0);
        assert_eq!(a.vertices[0].uv, Vec2::new(0.0, 0.0));
        assert_eq!(b.vertices[1].uv, Vec2::new(1.0, 1.0));
        assert_eq!(b.vertices[1].pos, Vec3::new(10.0, 10.0, 0.0));
    }
}
