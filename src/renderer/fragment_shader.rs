use cgmath::{ElementWise, InnerSpace, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

use crate::renderer::Light;
use crate::texture::Texture;

#[derive(Debug)]
pub struct FragmentData<'a> {
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    /// Interpolated vertex colour.
    pub color: Vec3<f32>,
    pub texture: Option<&'a Texture>,
    pub camera_pos: Vec3<f32>,
}

pub trait FragmentShader: Sync {
    /// RGBA in [0, 1]. Fragments with zero alpha are discarded.
    fn shade(&self, data: FragmentData) -> Vec4<f32>;
}

/// Blinn-Phong lighting of the vertex colour (or texture).
pub struct PhongShader {
    pub light: Light,
    pub shininess: f32,
    pub specular_strength: f32,
}

impl PhongShader {
    pub fn new(light: Light) -> Self {
        Self {
            light,
            shininess: 32.0,
            specular_strength: 0.4,
        }
    }
}

impl FragmentShader for PhongShader {
    fn shade(&self, data: FragmentData) -> Vec4<f32> {
        let base_color = match data.texture {
            Some(tex) => tex.sample(data.uv).truncate(),
            None => data.color,
        };

        let ambient = self.light.ambient_color * self.light.ambient_strength;

        let light_dir = self.light.direction.normalize();
        let diff = data.normal.dot(-light_dir).max(0.0);
        let diffuse = self.light.color * self.light.intensity * diff;

        let specular = if data.normal.magnitude2() > 0.0 {
            let view_dir = (data.camera_pos - data.world_pos).normalize();
            let half_dir = (-light_dir + view_dir).normalize();
            let spec = data.normal.dot(half_dir).max(0.0).powf(self.shininess);
            self.light.color * self.specular_strength * spec
        } else {
            Vec3::new(0.0, 0.0, 0.0)
        };

        let lit = base_color.mul_element_wise(ambient + diffuse) + specular;
        lit.map(|c| c.clamp(0.0, 1.0)).extend(1.0)
    }
}

/// Unlit texture lookup, used for the overlay quad.
pub struct TextureShader;

impl FragmentShader for TextureShader {
    fn shade(&self, data: FragmentData) -> Vec4<f32> {
        match data.texture {
            Some(tex) => tex.sample(data.uv),
            None => data.color.extend(1.0),
        }
    }
}

/// Debug view of the shading normal.
pub struct NormalDebugShader;

impl FragmentShader for NormalDebugShader {
    fn shade(&self, data: FragmentData) -> Vec4<f32> {
        ((data.normal + Vec3::new(1.0, 1.0, 1.0)) * 0.5).extend(1.0)
    }
}
