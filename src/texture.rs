use cgmath::{Vector2 as Vec2, Vector4 as Vec4};
use log::{info, warn};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::error::BasecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

/// RGBA8 image, one `u32` per texel packed as `0xRRGGBBAA`. Row 0 is the top
/// of the image and is what `v = 0` samples.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub wrap: WrapMode,
}

fn pack(rgba: [u8; 4]) -> u32 {
    u32::from_be_bytes(rgba)
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0xFFFFFFFF; width * height],
            wrap: WrapMode::default(),
        }
    }

    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        let data = rgba
            .chunks_exact(4)
            .map(|p| pack([p[0], p[1], p[2], p[3]]))
            .collect();
        Self {
            width,
            height,
            data,
            wrap: WrapMode::default(),
        }
    }

    pub fn from_file(path: &Path, flip_vertically: bool) -> Result<Self, BasecodeError> {
        let img = image::open(path).map_err(|source| BasecodeError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        let img = if flip_vertically { img.flipv() } else { img };
        let img = img.to_rgba8();
        let (width, height) = img.dimensions();
        info!("Loaded texture {} ({width}x{height})", path.display());

        Ok(Self::from_rgba(width as usize, height as usize, img.as_raw()))
    }

    /// Loads `path` when given and readable, otherwise builds `fallback`.
    pub fn load_or_else(
        path: Option<&Path>,
        flip_vertically: bool,
        fallback: impl FnOnce() -> Texture,
    ) -> Texture {
        match path.map(|p| Self::from_file(p, flip_vertically)) {
            Some(Ok(texture)) => texture,
            Some(Err(err)) => {
                warn!("{err} - using a generated texture instead");
                fallback()
            }
            None => fallback(),
        }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Overwrites a block of texels starting at (`x`, `y`). Texels falling
    /// outside the texture are dropped.
    pub fn set_region(&mut self, x: usize, y: usize, region: &Texture) {
        if x >= self.width {
            return;
        }
        for row in 0..region.height {
            let ty = y + row;
            if ty >= self.height {
                break;
            }
            let columns = region.width.min(self.width.saturating_sub(x));
            let dst = ty * self.width + x;
            let src = row * region.width;
            self.data[dst..dst + columns].copy_from_slice(&region.data[src..src + columns]);
        }
    }

    pub fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        self.data[y * self.width + x].to_be_bytes()
    }

    fn wrap_coord(&self, t: f32, size: usize) -> usize {
        let t = match self.wrap {
            WrapMode::ClampToEdge => t.clamp(0.0, 1.0),
            WrapMode::Repeat => t.rem_euclid(1.0),
        };
        ((t * size as f32) as usize).min(size - 1)
    }

    /// Nearest-texel lookup, RGBA in [0, 1].
    pub fn sample(&self, uv: Vec2<f32>) -> Vec4<f32> {
        if self.width == 0 || self.height == 0 {
            return Vec4::new(1.0, 0.0, 1.0, 1.0);
        }
        let x = self.wrap_coord(uv.x, self.width);
        let y = self.wrap_coord(uv.y, self.height);
        let [r, g, b, a] = self.texel(x, y);
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }

    /// Grey escape-time rendering of a small region of the Mandelbrot set.
    pub fn mandelbrot(width: usize, height: usize) -> Self {
        const MAX_ITERATIONS: u8 = 255;
        let region_width = 0.25;
        let region_height = 0.20;
        let centre_x = 0.3;
        let centre_y = 0.0;

        let data = (0..width * height)
            .into_par_iter()
            .map(|index| {
                let (i, j) = (index % width, index / width);
                let x0 = centre_x - region_width / 2.0 + region_width * (i as f64 / width as f64);
                let y0 = centre_y - region_height / 2.0 + region_height * (j as f64 / height as f64);

                let (mut x, mut y) = (0.0f64, 0.0f64);
                let mut iteration = 0u8;
                while x * x + y * y < 4.0 && iteration < MAX_ITERATIONS {
                    let xtemp = x * x - y * y + x0;
                    y = 2.0 * x * y + y0;
                    x = xtemp;
                    iteration += 1;
                }
                pack([iteration, iteration, iteration, 255])
            })
            .collect();

        Self {
            width,
            height,
            data,
            wrap: WrapMode::default(),
        }
    }

    pub fn checkerboard(width: usize, height: usize, cell: usize, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let data = (0..width * height)
            .map(|index| {
                let (x, y) = (index % width, index / width);
                if (x / cell + y / cell) % 2 == 0 { pack(a) } else { pack(b) }
            })
            .collect();
        Self {
            width,
            height,
            data,
            wrap: WrapMode::default(),
        }
    }
}
