pub mod clip;
pub mod fragment_shader;
pub mod lines;
pub mod vertex_shader;

use cgmath::{InnerSpace, Matrix, Matrix4 as Mat4, SquareMatrix, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

use crate::framebuffer::{FrameBuffer, pack_argb};
use crate::line::{Line, Point};
use crate::rasterizer;
use crate::texture::Texture;
use crate::vertex::{ClipSpaceVertex, RasterPoint, Triangle};

use self::clip::{Clipper, NearPlaneClipper};
use self::fragment_shader::{FragmentData, FragmentShader};
use self::lines::ScreenPoint;
use self::vertex_shader::{DefaultVertexShader, VertexShader, VertexShaderUniforms};

pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Direction the light travels in.
    pub direction: Vec3<f32>,
    pub color: Vec3<f32>,
    pub intensity: f32,
    pub ambient_strength: f32,
    pub ambient_color: Vec3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.4, -1.0, -0.6).normalize(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 0.8,
            ambient_strength: 0.25,
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Fixed-function switches for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub depth_test: bool,
    pub cull_back_faces: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            depth_test: true,
            cull_back_faces: false,
        }
    }
}

/// Matrices for one draw call.
#[derive(Debug, Clone, Copy)]
pub struct Transforms {
    pub model: Mat4<f32>,
    pub view: Mat4<f32>,
    pub projection: Mat4<f32>,
    pub camera_pos: Vec3<f32>,
}

impl Transforms {
    pub fn view_projection(&self) -> Mat4<f32> {
        self.projection * self.view
    }
}

struct RasterTriangle {
    vertices: [RasterPoint; 3],
}

pub struct Renderer {
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) viewport: Viewport,
    pub(crate) light: Light,
    clipper: NearPlaneClipper,
}

impl Renderer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(w, h),
            viewport: Viewport {
                x: 0,
                y: 0,
                w: w as i32,
                h: h as i32,
            },
            light: Light::default(),
            clipper: NearPlaneClipper,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    pub fn light(&self) -> Light {
        self.light
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.framebuffer.resize(w, h);
        self.viewport = Viewport {
            x: 0,
            y: 0,
            w: w as i32,
            h: h as i32,
        };
    }

    pub fn clear(&mut self, color: Vec4<f32>) {
        self.framebuffer.clear(pack_argb(color));
    }

    /// Vertex shading, near-plane clipping, viewport transform and
    /// rasterization for a list of triangles.
    pub fn draw_triangles(
        &mut self,
        triangles: &[Triangle],
        transforms: &Transforms,
        shader: &dyn FragmentShader,
        texture: Option<&Texture>,
        state: RenderState,
    ) {
        let mvp_matrix = transforms.projection * transforms.view * transforms.model;
        let normal_matrix = transforms
            .model
            .invert()
            .map(|m| m.transpose())
            .unwrap_or(transforms.model);

        let vertex_shader = DefaultVertexShader;
        let uniforms = VertexShaderUniforms {
            model_matrix: &transforms.model,
            mvp_matrix: &mvp_matrix,
            normal_matrix: &normal_matrix,
        };

        for triangle in triangles {
            let clip_space_triangle = vertex_shader.shade_triangle(triangle, &uniforms);

            for clipped in self.clipper.clip_triangle(&clip_space_triangle) {
                let raster_triangle = self.viewport_transform(&clipped);
                let screen = raster_triangle.vertices.map(|p| p.pos);
                // counter-clockwise in NDC is clockwise on the y-down screen
                if state.cull_back_faces && rasterizer::signed_area(&screen) >= 0.0 {
                    continue;
                }
                self.rasterize_triangle(&raster_triangle, texture, shader, transforms.camera_pos, state);
            }
        }
    }

    fn to_raster_point(&self, clip_v: &ClipSpaceVertex) -> RasterPoint {
        let inv_w = 1.0 / clip_v.position.w;
        let ndc = clip_v.position.truncate() * inv_w;

        let screen_x = (ndc.x + 1.0) * 0.5 * self.viewport.w as f32 + self.viewport.x as f32;
        let screen_y =
            self.viewport.h as f32 - (ndc.y + 1.0) * 0.5 * self.viewport.h as f32 + self.viewport.y as f32;

        RasterPoint {
            pos: Vec2::new(screen_x, screen_y),
            z: (ndc.z + 1.0) * 0.5,
            inv_w,
            world_pos: clip_v.world_pos,
            normal: clip_v.normal,
            uv: clip_v.uv,
            color: clip_v.color,
        }
    }

    fn viewport_transform(&self, clip_triangle: &[ClipSpaceVertex; 3]) -> RasterTriangle {
        RasterTriangle {
            vertices: clip_triangle.map(|v| self.to_raster_point(&v)),
        }
    }

    fn rasterize_triangle(
        &mut self,
        triangle: &RasterTriangle,
        texture: Option<&Texture>,
        shader: &dyn FragmentShader,
        camera_pos: Vec3<f32>,
        state: RenderState,
    ) {
        let points = &triangle.vertices;
        let screen = [points[0].pos, points[1].pos, points[2].pos];
        let Some((min_x, min_y, max_x, max_y)) =
            rasterizer::get_box(&screen, self.framebuffer.width, self.framebuffer.height)
        else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !rasterizer::is_inside_triangle(&screen, &p) {
                    continue;
                }
                let Some(bary) = rasterizer::get_barycentric_coords(&screen, &p) else {
                    continue;
                };

                let depth = rasterizer::interpolate_depth(points, bary);
                if state.depth_test {
                    let idx = y as usize * self.framebuffer.width + x as usize;
                    if depth >= self.framebuffer.depth[idx] {
                        continue;
                    }
                }

                let attributes = rasterizer::interpolate_attributes(points, bary);
                let normal = if attributes.normal.magnitude2() > 0.0 {
                    attributes.normal.normalize()
                } else {
                    attributes.normal
                };
                let color = shader.shade(FragmentData {
                    world_pos: attributes.world_pos,
                    normal,
                    uv: attributes.uv,
                    color: attributes.color,
                    texture,
                    camera_pos,
                });
                if color.w <= 0.0 {
                    continue;
                }

                let packed = pack_argb(color.truncate().extend(1.0));
                if state.depth_test {
                    self.framebuffer.put_pixel(x as usize, y as usize, packed, depth);
                } else {
                    self.framebuffer.overwrite_pixel(x as usize, y as usize, packed);
                }
            }
        }
    }

    fn project(&self, mvp: &Mat4<f32>, p: Vec3<f32>) -> ClipSpaceVertex {
        let zero = Vec3::new(0.0, 0.0, 0.0);
        ClipSpaceVertex {
            position: *mvp * p.extend(1.0),
            world_pos: p,
            normal: zero,
            uv: Vec2::new(0.0, 0.0),
            color: zero,
        }
    }

    fn to_screen_point(&self, v: &ClipSpaceVertex) -> ScreenPoint {
        let p = self.to_raster_point(v);
        ScreenPoint::new(p.pos.x, p.pos.y, p.z)
    }

    /// Draws each (start, end) pair as a line segment in world space.
    pub fn draw_lines(
        &mut self,
        segments: impl IntoIterator<Item = (Vec3<f32>, Vec3<f32>)>,
        view_projection: &Mat4<f32>,
        colour: Vec4<f32>,
        width: f32,
        state: RenderState,
    ) {
        let color = pack_argb(colour);
        for (start, end) in segments {
            let a = self.project(view_projection, start);
            let b = self.project(view_projection, end);
            let Some((a, b)) = self.clipper.clip_line(&a, &b) else {
                continue;
            };
            let Some((p0, p1)) = lines::clip_to_rect(
                self.to_screen_point(&a),
                self.to_screen_point(&b),
                self.framebuffer.width,
                self.framebuffer.height,
            ) else {
                continue;
            };
            lines::draw_line(&mut self.framebuffer, p0, p1, color, width, state.depth_test);
        }
    }

    pub fn draw_line(&mut self, line: &Line, view_projection: &Mat4<f32>) {
        self.draw_lines(
            [(line.p1, line.p2)],
            view_projection,
            line.colour,
            line.width,
            RenderState::default(),
        );
    }

    pub fn draw_points(&mut self, points: &[Point], mvp: &Mat4<f32>) {
        for point in points {
            let v = self.project(mvp, point.location);
            if v.position.z + v.position.w < 0.0 {
                continue;
            }
            let p = self.to_screen_point(&v);
            lines::plot_square(
                &mut self.framebuffer,
                p.x.floor() as i32,
                p.y.floor() as i32,
                pack_argb(point.colour),
                p.z,
                point.size,
                true,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::fragment_shader::NormalDebugShader;
    use crate::vertex::Vertex;
    use cgmath::ortho;

    fn flat_transforms(w: f32, h: f32) -> Transforms {
        Transforms {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: ortho(0.0, w, h, 0.0, 0.1, 100.0),
            camera_pos: Vec3::new(0.0, 0.0, 0.0),
        }
    }

    fn square_triangle(z: f32) -> Triangle {
        let v = |x: f32, y: f32| Vertex::new(Vec3::new(x, y, z), Vec3::new(0.0, 0.0, 1.0));
        Triangle::new(v(0.0, 0.0), v(16.0, 0.0), v(0.0, 16.0))
    }

    #[test]
    fn triangle_covers_pixels_inside_only() {
        let mut renderer = Renderer::new(16, 16);
        renderer.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
        renderer.draw_triangles(
            &[square_triangle(-1.0)],
            &flat_transforms(16.0, 16.0),
            &NormalDebugShader,
            None,
            RenderState::default(),
        );
        let fb = renderer.framebuffer();
        assert_ne!(fb.get_pixel(2, 2), Some(0xFF000000));
        assert_eq!(fb.get_pixel(14, 14), Some(0xFF000000));
    }

    #[test]
    fn nearer_triangle_wins_the_depth_test() {
        let mut renderer = Renderer::new(16, 16);
        renderer.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
        let transforms = flat_transforms(16.0, 16.0);
        renderer.draw_triangles(&[square_triangle(-2.0)], &transforms, &NormalDebugShader, None, RenderState::default());
        let near_depth = renderer.framebuffer().depth[2 * 16 + 2];
        renderer.draw_triangles(&[square_triangle(-50.0)], &transforms, &NormalDebugShader, None, RenderState::default());
        assert_eq!(renderer.framebuffer().depth[2 * 16 + 2], near_depth);
    }

    #[test]
    fn lines_behind_the_camera_are_skipped() {
        let mut renderer = Renderer::new(32, 32);
        renderer.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
        let camera = crate::camera::Camera::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
        let proj = crate::camera::Frustum::new(1.0, 1.0, 100.0, 90f32.to_radians());
        let vp = *proj.get_mat() * camera.get_view_mat();
        renderer.draw_lines(
            [(Vec3::new(-1.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0))],
            &vp,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            1.0,
            RenderState::default(),
        );
        assert!(renderer.framebuffer().data.iter().all(|&p| p == 0xFF000000));

        renderer.draw_lines(
            [(Vec3::new(-1.0, 0.0, -5.0), Vec3::new(1.0, 0.0, -5.0))],
            &vp,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            1.0,
            RenderState::default(),
        );
        assert!(renderer.framebuffer().data.iter().any(|&p| p == 0xFFFFFFFF));
    }
}
