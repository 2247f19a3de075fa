use crate::vertex::{ClipSpaceVertex, Triangle, Vertex};
use cgmath::{InnerSpace, Matrix4 as Mat4};

pub struct VertexShaderUniforms<'a> {
    pub model_matrix: &'a Mat4<f32>,
    pub mvp_matrix: &'a Mat4<f32>,
    pub normal_matrix: &'a Mat4<f32>,
}

pub trait VertexShader {
    fn shade_vertex(&self, vertex: &Vertex, uniforms: &VertexShaderUniforms) -> ClipSpaceVertex;

    /// Model-space triangle to clip space.
    fn shade_triangle(&self, triangle: &Triangle, uniforms: &VertexShaderUniforms) -> [ClipSpaceVertex; 3] {
        triangle.vertices.map(|v| self.shade_vertex(&v, uniforms))
    }
}

pub struct DefaultVertexShader;

impl VertexShader for DefaultVertexShader {
    fn shade_vertex(&self, v: &Vertex, uniforms: &VertexShaderUniforms) -> ClipSpaceVertex {
        let normal = (*uniforms.normal_matrix * v.normal.extend(0.0)).truncate();
        ClipSpaceVertex {
            position: *uniforms.mvp_matrix * v.pos.extend(1.0),
            world_pos: (*uniforms.model_matrix * v.pos.extend(1.0)).truncate(),
            // generated normals of degenerate faces are zero
            normal: if normal.magnitude2() > 0.0 { normal.normalize() } else { normal },
            uv: v.uv,
            color: v.color,
        }
    }
}
