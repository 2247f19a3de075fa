use std::path::Path;

use cgmath::Vector4 as Vec4;
use rayon::prelude::*;

use crate::error::BasecodeError;

/// Depth written by `clear`. Window depth lies in [0, 1], so anything drawn
/// passes the test against a cleared pixel.
pub const CLEAR_DEPTH: f32 = f32::INFINITY;

/// Packs an RGBA colour in [0, 1] as `0xAARRGGBB`, the layout minifb presents.
pub fn pack_argb(color: Vec4<f32>) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    to_byte(color.w) << 24 | to_byte(color.x) << 16 | to_byte(color.y) << 8 | to_byte(color.z)
}

pub fn unpack_argb(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
            depth: vec![CLEAR_DEPTH; width * height],
        }
    }

    /// Reallocates for a new window size. Contents are lost.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = FrameBuffer::new(width, height);
    }

    pub fn clear(&mut self, color: u32) {
        self.data.par_iter_mut().for_each(|p| *p = color);
        self.depth.par_iter_mut().for_each(|d| *d = CLEAR_DEPTH);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    /// Writes `color` if `depth` is nearer than what is stored.
    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32, depth: f32) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if depth < self.depth[idx] {
                self.data[idx] = color;
                self.depth[idx] = depth;
            }
        }
    }

    /// Writes `color` without reading or updating depth.
    pub fn overwrite_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = color;
        }
    }

    /// Blends a premultiplied-alpha RGBA colour over the stored pixel:
    /// `dst = src + dst * (1 - src_alpha)`.
    pub fn blend_premultiplied(&mut self, x: usize, y: usize, src: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        let [dr, dg, db, da] = unpack_argb(self.data[idx]);
        let inv = 255 - src[3] as u32;
        let mix = |s: u8, d: u8| (s as u32 + (d as u32 * inv + 127) / 255).min(255);
        self.data[idx] = mix(src[3], da) << 24 | mix(src[0], dr) << 16 | mix(src[1], dg) << 8 | mix(src[2], db);
    }

    /// Saves the colour buffer as an opaque PNG (or any format `image` infers
    /// from the extension).
    pub fn save_to_image(&self, filepath: &Path) -> Result<(), BasecodeError> {
        use image::{ImageBuffer, Rgba};

        let pixels: Vec<u8> = self
            .data
            .par_iter()
            .flat_map_iter(|&color| {
                let [r, g, b, _] = unpack_argb(color);
                [r, g, b, 255]
            })
            .collect();

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width as u32, self.height as u32, pixels)
                .ok_or_else(|| BasecodeError::Screenshot {
                    path: filepath.to_path_buf(),
                    source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                        image::error::ParameterErrorKind::DimensionMismatch,
                    )),
                })?;

        img.save(filepath).map_err(|source| BasecodeError::Screenshot {
            path: filepath.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_the_nearest() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(0xFF000000);
        fb.put_pixel(1, 1, 0xFFFF0000, 0.5);
        fb.put_pixel(1, 1, 0xFF00FF00, 0.7);
        assert_eq!(fb.get_pixel(1, 1), Some(0xFFFF0000));
        fb.put_pixel(1, 1, 0xFF0000FF, 0.2);
        assert_eq!(fb.get_pixel(1, 1), Some(0xFF0000FF));
        fb.put_pixel(10, 10, 0xFFFFFFFF, 0.0);
        assert_eq!(fb.get_pixel(10, 10), None);
    }

    #[test]
    fn premultiplied_blend() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(0xFF0000FF);
        // half-transparent premultiplied red
        fb.blend_premultiplied(0, 0, [128, 0, 0, 128]);
        let [r, g, b, a] = unpack_argb(fb.data[0]);
        assert_eq!((r, g, a), (128, 0, 255));
        assert!((126..=128).contains(&b));
    }

    #[test]
    fn pack_rounds_and_clamps() {
        assert_eq!(pack_argb(Vec4::new(1.0, 0.0, 0.5, 1.0)), 0xFFFF0080);
        assert_eq!(pack_argb(Vec4::new(2.0, -1.0, 0.0, 1.0)), 0xFFFF0000);
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(3, 5);
        assert_eq!(fb.data.len(), 15);
        assert_eq!(fb.depth.len(), 15);
    }
}
