//! Screen-space line drawing: Cohen-Sutherland clipping to the target
//! rectangle, then Bresenham with depth interpolated along the run.

use crate::framebuffer::FrameBuffer;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// A projected endpoint: pixel position and window depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn lerp(&self, other: &ScreenPoint, t: f32) -> ScreenPoint {
        ScreenPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

fn compute_code(p: &ScreenPoint, max_x: f32, max_y: f32) -> u8 {
    let mut code = INSIDE;
    if p.x < 0.0 {
        code |= LEFT;
    } else if p.x > max_x {
        code |= RIGHT;
    }
    if p.y < 0.0 {
        code |= BOTTOM;
    } else if p.y > max_y {
        code |= TOP;
    }
    code
}

/// Clips the segment to `[0, width - 1] x [0, height - 1]`. Depth follows the
/// cut points.
pub fn clip_to_rect(
    mut p0: ScreenPoint,
    mut p1: ScreenPoint,
    width: usize,
    height: usize,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if width == 0 || height == 0 {
        return None;
    }
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;

    let mut code0 = compute_code(&p0, max_x, max_y);
    let mut code1 = compute_code(&p1, max_x, max_y);

    loop {
        if code0 == INSIDE && code1 == INSIDE {
            return Some((p0, p1));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let code_out = if code0 != INSIDE { code0 } else { code1 };
        let t = if code_out & TOP != 0 {
            (max_y - p0.y) / (p1.y - p0.y)
        } else if code_out & BOTTOM != 0 {
            (0.0 - p0.y) / (p1.y - p0.y)
        } else if code_out & RIGHT != 0 {
            (max_x - p0.x) / (p1.x - p0.x)
        } else {
            (0.0 - p0.x) / (p1.x - p0.x)
        };
        let mut cut = p0.lerp(&p1, t);
        // snap the clipped coordinate exactly onto the edge
        if code_out & TOP != 0 {
            cut.y = max_y;
        } else if code_out & BOTTOM != 0 {
            cut.y = 0.0;
        } else if code_out & RIGHT != 0 {
            cut.x = max_x;
        } else {
            cut.x = 0.0;
        }

        if code_out == code0 {
            p0 = cut;
            code0 = compute_code(&p0, max_x, max_y);
        } else {
            p1 = cut;
            code1 = compute_code(&p1, max_x, max_y);
        }
    }
}

/// Bresenham from `p0` to `p1` (both inside the target), `width` pixels thick.
/// With `depth_test` off the line is drawn over everything.
pub fn draw_line(
    framebuffer: &mut FrameBuffer,
    p0: ScreenPoint,
    p1: ScreenPoint,
    color: u32,
    width: f32,
    depth_test: bool,
) {
    let mut x0 = p0.x.round() as i32;
    let mut y0 = p0.y.round() as i32;
    let x1 = p1.x.round() as i32;
    let y1 = p1.y.round() as i32;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let steps = dx.max(dy).max(1) as f32;
    let mut step = 0.0;

    loop {
        let depth = p0.z + (p1.z - p0.z) * (step / steps);
        plot_square(framebuffer, x0, y0, color, depth, width, depth_test);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
        step += 1.0;
    }
}

/// Fills a `size` x `size` block centred on (`x`, `y`).
pub fn plot_square(
    framebuffer: &mut FrameBuffer,
    x: i32,
    y: i32,
    color: u32,
    depth: f32,
    size: f32,
    depth_test: bool,
) {
    let size = size.max(1.0).round() as i32;
    let start = -(size - 1) / 2;
    for oy in start..start + size {
        for ox in start..start + size {
            let (px, py) = (x + ox, y + oy);
            if px < 0 || py < 0 {
                continue;
            }
            if depth_test {
                framebuffer.put_pixel(px as usize, py as usize, color, depth);
            } else {
                framebuffer.overwrite_pixel(px as usize, py as usize, color);
            }
        }
    }
}
