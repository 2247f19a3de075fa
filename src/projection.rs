use cgmath::{Matrix4 as Mat4, ortho};
use log::debug;
use serde::Deserialize;

use crate::camera::Frustum;
use crate::config::ProjectionConfig;

pub const MIN_HORIZONTAL_FOV_DEGS: f32 = 10.0;
pub const MAX_HORIZONTAL_FOV_DEGS: f32 = 140.0;

/// How the field of view reacts to a change of aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FovMode {
    /// The vertical FoV stays fixed, wider windows see more horizontally.
    #[default]
    HorizontalPlus,
    /// The horizontal FoV stays fixed, wider windows see less vertically.
    VerticalMinus,
}

impl FovMode {
    pub fn toggled(self) -> Self {
        match self {
            FovMode::HorizontalPlus => FovMode::VerticalMinus,
            FovMode::VerticalMinus => FovMode::HorizontalPlus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FovMode::HorizontalPlus => "Hor+",
            FovMode::VerticalMinus => "Vert-",
        }
    }
}

/// Vertical FoV in radians that gives `hfov_rads` across a `width` x `height` surface.
pub fn vertical_fov(hfov_rads: f32, width: f32, height: f32) -> f32 {
    2.0 * ((hfov_rads / 2.0).tan() * height / width).atan()
}

/// Horizontal FoV in radians that gives `vfov_rads` at the given aspect ratio.
pub fn horizontal_fov(vfov_rads: f32, aspect: f32) -> f32 {
    2.0 * ((vfov_rads / 2.0).tan() * aspect).atan()
}

/// Perspective and overlay projections for the current window size.
#[derive(Debug, Clone)]
pub struct Projection {
    width: usize,
    height: usize,
    mode: FovMode,
    hfov_degs: f32,
    /// Vertical FoV kept constant by Hor+; only changed by zooming.
    stored_vfov_rads: f32,
    near: f32,
    far: f32,
    frustum: Frustum,
    ortho: Mat4<f32>,
}

impl Projection {
    pub fn new(width: usize, height: usize, config: &ProjectionConfig) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let hfov_degs = config
            .hfov
            .clamp(MIN_HORIZONTAL_FOV_DEGS, MAX_HORIZONTAL_FOV_DEGS);
        let stored_vfov_rads = vertical_fov(hfov_degs.to_radians(), width as f32, height as f32);
        let aspect = width as f32 / height as f32;

        let mut projection = Self {
            width,
            height,
            mode: config.mode,
            hfov_degs,
            stored_vfov_rads,
            near: config.near,
            far: config.far,
            frustum: Frustum::new(config.near, aspect, config.far, stored_vfov_rads),
            ortho: Mat4::from_scale(1.0),
        };
        projection.resize(width, height);
        projection
    }

    /// Recomputes both projections. Zero sizes are treated as 1.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        let (w, h) = (self.width as f32, self.height as f32);
        let aspect = w / h;

        let vfov_rads = match self.mode {
            FovMode::VerticalMinus => vertical_fov(self.hfov_degs.to_radians(), w, h),
            FovMode::HorizontalPlus => {
                let hfov_rads = horizontal_fov(self.stored_vfov_rads, aspect);
                self.hfov_degs = hfov_rads.to_degrees();
                vertical_fov(hfov_rads, w, h)
            }
        };
        debug!(
            "{}: {}x{} uses a horizontal FoV of {:.2} and a vertical FoV of {:.2} degs",
            self.mode.label(),
            self.width,
            self.height,
            self.hfov_degs,
            vfov_rads.to_degrees()
        );

        self.frustum = Frustum::new(self.near, aspect, self.far, vfov_rads);
        // (0, 0) top-left, (w, h) bottom-right
        self.ortho = ortho(0.0, w, h, 0.0, 0.1, 100.0);
    }

    /// Mouse wheel zoom: scrolling up narrows the horizontal FoV.
    pub fn scroll(&mut self, y_offset: f32) {
        self.hfov_degs = (self.hfov_degs - y_offset)
            .clamp(MIN_HORIZONTAL_FOV_DEGS, MAX_HORIZONTAL_FOV_DEGS);
        self.stored_vfov_rads = vertical_fov(
            self.hfov_degs.to_radians(),
            self.width as f32,
            self.height as f32,
        );
        self.resize(self.width, self.height);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.resize(self.width, self.height);
    }

    pub fn mode(&self) -> FovMode {
        self.mode
    }

    pub fn hfov_degs(&self) -> f32 {
        self.hfov_degs
    }

    pub fn vfov_rads(&self) -> f32 {
        self.frustum.fovy()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.frustum.aspect()
    }

    pub fn perspective(&self) -> &Mat4<f32> {
        self.frustum.get_mat()
    }

    pub fn ortho(&self) -> &Mat4<f32> {
        &self.ortho
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4 as Vec4;

    const EPS: f32 = 1e-3;

    fn projection(mode: FovMode) -> Projection {
        let config = ProjectionConfig {
            mode,
            ..Default::default()
        };
        Projection::new(1280, 720, &config)
    }

    #[test]
    fn initial_vertical_fov_follows_the_aspect_ratio() {
        let p = projection(FovMode::HorizontalPlus);
        let expected = 2.0 * (45f32.to_radians().tan() * 720.0 / 1280.0).atan();
        assert!((p.vfov_rads() - expected).abs() < EPS);
        assert!((p.hfov_degs() - 90.0).abs() < EPS);
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut p = projection(FovMode::VerticalMinus);
        p.resize(0, 0);
        assert_eq!((p.width(), p.height()), (1, 1));
        assert!(p.perspective().x.x.is_finite());
    }

    #[test]
    fn hor_plus_keeps_vertical_fov_on_resize() {
        let mut p = projection(FovMode::HorizontalPlus);
        let vfov = p.vfov_rads();
        p.resize(1920, 720);
        assert!((p.vfov_rads() - vfov).abs() < EPS);
        assert!(p.hfov_degs() > 90.0);
    }

    #[test]
    fn vert_minus_keeps_horizontal_fov_on_resize() {
        let mut p = projection(FovMode::VerticalMinus);
        let vfov = p.vfov_rads();
        p.resize(1920, 720);
        assert!((p.hfov_degs() - 90.0).abs() < EPS);
        assert!(p.vfov_rads() < vfov);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut p = projection(FovMode::HorizontalPlus);
        p.scroll(1.0);
        assert!((p.hfov_degs() - 89.0).abs() < EPS);
        p.scroll(500.0);
        assert!((p.hfov_degs() - MIN_HORIZONTAL_FOV_DEGS).abs() < EPS);
        p.scroll(-500.0);
        assert!((p.hfov_degs() - MAX_HORIZONTAL_FOV_DEGS).abs() < EPS);
    }

    #[test]
    fn toggle_flips_mode() {
        let mut p = projection(FovMode::HorizontalPlus);
        p.toggle_mode();
        assert_eq!(p.mode(), FovMode::VerticalMinus);
        assert_eq!(p.mode().label(), "Vert-");
    }

    #[test]
    fn ortho_maps_top_left_and_bottom_right() {
        let p = projection(FovMode::HorizontalPlus);
        let top_left = *p.ortho() * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let bottom_right = *p.ortho() * Vec4::new(1280.0, 720.0, -1.0, 1.0);
        assert!((top_left.x + 1.0).abs() < EPS && (top_left.y - 1.0).abs() < EPS);
        assert!((bottom_right.x - 1.0).abs() < EPS && (bottom_right.y + 1.0).abs() < EPS);
    }
}
