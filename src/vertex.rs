use cgmath::{InnerSpace, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4, Zero};

/// Model-space vertex fed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            pos: Vec3::zero(),
            normal: Vec3::new(0.0, 1.0, 0.0),
            uv: Vec2::zero(),
            color: Vec3::new(0.8, 0.8, 0.8),
        }
    }
}

impl Vertex {
    pub fn new(pos: Vec3<f32>, normal: Vec3<f32>) -> Self {
        Vertex {
            pos,
            normal,
            ..Default::default()
        }
    }

    pub fn textured(pos: Vec3<f32>, uv: Vec2<f32>) -> Self {
        Vertex {
            pos,
            uv,
            normal: Vec3::new(0.0, 0.0, 1.0),
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Output of the vertex shader, before the perspective divide.
#[derive(Debug, Clone, Copy)]
pub struct ClipSpaceVertex {
    pub position: Vec4<f32>,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

impl ClipSpaceVertex {
    /// Linear blend towards `other`, used when the clipper splits an edge.
    pub fn lerp(&self, other: &ClipSpaceVertex, t: f32) -> ClipSpaceVertex {
        ClipSpaceVertex {
            position: self.position + (other.position - self.position) * t,
            world_pos: self.world_pos + (other.world_pos - self.world_pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
            uv: self.uv + (other.uv - self.uv) * t,
            color: self.color + (other.color - self.color) * t,
        }
    }
}

/// Screen-space point handed to the rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct RasterPoint {
    pub pos: Vec2<f32>,
    /// Window depth in [0, 1].
    pub z: f32,
    /// 1 / clip w, for perspective-correct attribute interpolation.
    pub inv_w: f32,
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub normal: Vec3<f32>,
}

impl Triangle {
    fn compute_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vec3<f32> {
        let edge1 = v1.pos - v0.pos;
        let edge2 = v2.pos - v0.pos;
        let cross = edge1.cross(edge2);
        if cross.magnitude2() > 0.0 {
            cross.normalize()
        } else {
            Vec3::zero()
        }
    }

    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        let normal = Self::compute_normal(&v0, &v1, &v2);
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    pub fn get_center(&self) -> Vec3<f32> {
        (self.vertices[0].pos + self.vertices[1].pos + self.vertices[2].pos) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_normal_follows_counter_clockwise_winding() {
        let tri = Triangle::new(
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::zero()),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zero()),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::zero()),
        );
        assert_eq!(tri.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!((tri.get_center() - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).magnitude() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let p = Vertex::new(Vec3::new(2.0, 2.0, 2.0), Vec3::zero());
        let tri = Triangle::new(p, p, p);
        assert_eq!(tri.normal, Vec3::zero());
    }
}
