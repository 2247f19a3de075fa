//! Paints tessellated egui output into the framebuffer on the CPU.

use std::collections::HashMap;

use cgmath::Vector2 as Vec2;
use egui::epaint::{ClippedPrimitive, ImageDelta, Mesh, Primitive};
use log::warn;

use crate::framebuffer::FrameBuffer;
use crate::rasterizer;
use crate::texture::Texture;

/// Clip rectangle in whole pixels, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl PixelRect {
    fn from_clip(clip: egui::Rect, pixels_per_point: f32, width: usize, height: usize) -> Option<Self> {
        let min_x = ((clip.min.x * pixels_per_point).floor() as i32).max(0);
        let min_y = ((clip.min.y * pixels_per_point).floor() as i32).max(0);
        let max_x = ((clip.max.x * pixels_per_point).ceil() as i32 - 1).min(width as i32 - 1);
        let max_y = ((clip.max.y * pixels_per_point).ceil() as i32 - 1).min(height as i32 - 1);
        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

#[derive(Default)]
pub struct SoftwarePainter {
    textures: HashMap<egui::TextureId, Texture>,
}

impl SoftwarePainter {
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn set_texture(&mut self, id: egui::TextureId, delta: &ImageDelta) {
        let [w, h] = delta.image.size();
        let pixels: Vec<u8> = match &delta.image {
            egui::ImageData::Color(image) => image.pixels.iter().flat_map(|c| c.to_array()).collect(),
            egui::ImageData::Font(image) => image.srgba_pixels(None).flat_map(|c| c.to_array()).collect(),
        };
        let region = Texture::from_rgba(w, h, &pixels);

        match delta.pos {
            Some([x, y]) => match self.textures.get_mut(&id) {
                Some(texture) => texture.set_region(x, y, &region),
                None => warn!("Partial update for unknown GUI texture {id:?}"),
            },
            None => {
                self.textures.insert(id, region);
            }
        }
    }

    pub fn free_texture(&mut self, id: &egui::TextureId) {
        self.textures.remove(id);
    }

    pub fn paint(&self, framebuffer: &mut FrameBuffer, primitives: &[ClippedPrimitive], pixels_per_point: f32) {
        for clipped in primitives {
            let Some(clip) =
                PixelRect::from_clip(clipped.clip_rect, pixels_per_point, framebuffer.width, framebuffer.height)
            else {
                continue;
            };
            match &clipped.primitive {
                Primitive::Mesh(mesh) => self.paint_mesh(framebuffer, mesh, clip, pixels_per_point),
                Primitive::Callback(_) => {}
            }
        }
    }

    fn paint_mesh(&self, framebuffer: &mut FrameBuffer, mesh: &Mesh, clip: PixelRect, pixels_per_point: f32) {
        let texture = self.textures.get(&mesh.texture_id);

        for face in mesh.indices.chunks_exact(3) {
            let corners = [
                &mesh.vertices[face[0] as usize],
                &mesh.vertices[face[1] as usize],
                &mesh.vertices[face[2] as usize],
            ];
            let screen = corners.map(|v| Vec2::new(v.pos.x * pixels_per_point, v.pos.y * pixels_per_point));
            let rgba = corners.map(|v| v.color.to_array());

            let Some((min_x, min_y, max_x, max_y)) =
                rasterizer::get_box(&screen, framebuffer.width, framebuffer.height)
            else {
                continue;
            };
            let (min_x, min_y) = (min_x.max(clip.min_x), min_y.max(clip.min_y));
            let (max_x, max_y) = (max_x.min(clip.max_x), max_y.min(clip.max_y));

            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if !rasterizer::is_inside_triangle(&screen, &p) {
                        continue;
                    }
                    let Some((u, v, w)) = rasterizer::get_barycentric_coords(&screen, &p) else {
                        continue;
                    };

                    let colour = |i: usize| {
                        rgba[0][i] as f32 * u + rgba[1][i] as f32 * v + rgba[2][i] as f32 * w
                    };
                    let tint = [colour(0), colour(1), colour(2), colour(3)];

                    let texel = match texture {
                        Some(tex) => {
                            let uv_x = corners[0].uv.x * u + corners[1].uv.x * v + corners[2].uv.x * w;
                            let uv_y = corners[0].uv.y * u + corners[1].uv.y * v + corners[2].uv.y * w;
                            let s = tex.sample(Vec2::new(uv_x, uv_y));
                            [s.x, s.y, s.z, s.w]
                        }
                        None => [1.0; 4],
                    };

                    let src = [0, 1, 2, 3].map(|i| (tint[i] * texel[i]).round().clamp(0.0, 255.0) as u8);
                    if src[3] == 0 && src[0] == 0 && src[1] == 0 && src[2] == 0 {
                        continue;
                    }
                    framebuffer.blend_premultiplied(x as usize, y as usize, src);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::epaint::Vertex;
    use egui::{Color32, ColorImage, Pos2, Rect, TextureId};
    use std::sync::Arc;

    fn white_texture(painter: &mut SoftwarePainter) -> TextureId {
        let id = TextureId::Managed(0);
        let image = ColorImage::new([2, 2], Color32::WHITE);
        painter.set_texture(id, &ImageDelta::full(egui::ImageData::Color(Arc::new(image)), Default::default()));
        id
    }

    fn quad(texture_id: TextureId, color: Color32) -> Mesh {
        let mut mesh = Mesh::with_texture(texture_id);
        let v = |x: f32, y: f32| Vertex {
            pos: Pos2::new(x, y),
            uv: Pos2::new(0.5, 0.5),
            color,
        };
        mesh.vertices = vec![v(0.0, 0.0), v(8.0, 0.0), v(8.0, 8.0), v(0.0, 8.0)];
        mesh.indices = vec![0, 1, 2, 0, 2, 3];
        mesh
    }

    #[test]
    fn opaque_mesh_replaces_the_background() {
        let mut painter = SoftwarePainter::default();
        let id = white_texture(&mut painter);
        let mut fb = FrameBuffer::new(8, 8);
        fb.clear(0xFF000000);

        let primitive = ClippedPrimitive {
            clip_rect: Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(8.0, 8.0)),
            primitive: Primitive::Mesh(quad(id, Color32::from_rgb(255, 0, 0))),
        };
        painter.paint(&mut fb, &[primitive], 1.0);
        assert!(fb.data.iter().all(|&p| p == 0xFFFF0000));
    }

    #[test]
    fn clip_rect_limits_painting() {
        let mut painter = SoftwarePainter::default();
        let id = white_texture(&mut painter);
        let mut fb = FrameBuffer::new(8, 8);
        fb.clear(0xFF000000);

        let primitive = ClippedPrimitive {
            clip_rect: Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(4.0, 8.0)),
            primitive: Primitive::Mesh(quad(id, Color32::WHITE)),
        };
        painter.paint(&mut fb, &[primitive], 1.0);
        assert_eq!(fb.get_pixel(3, 3), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(4, 3), Some(0xFF000000));
    }

    #[test]
    fn partial_updates_and_frees() {
        let mut painter = SoftwarePainter::default();
        let id = white_texture(&mut painter);
        let patch = ColorImage::new([1, 1], Color32::BLACK);
        painter.set_texture(
            id,
            &ImageDelta::partial([1, 1], egui::ImageData::Color(Arc::new(patch)), Default::default()),
        );
        assert_eq!(painter.textures[&id].texel(1, 1), [0, 0, 0, 255]);
        assert_eq!(painter.textures[&id].texel(0, 0), [255, 255, 255, 255]);
        painter.free_texture(&id);
        assert_eq!(painter.texture_count(), 0);
    }
}
