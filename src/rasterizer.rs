use crate::vertex::RasterPoint;
use cgmath::{Vector2 as Vec2, Vector3 as Vec3, dot};

/// Barycentric weights of `p`, one per vertex in order, or `None` for a
/// zero-area triangle.
pub fn get_barycentric_coords(
    vertices: &[Vec2<f32>; 3],
    p: &Vec2<f32>,
) -> Option<(f32, f32, f32)> {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[0];
    let v2 = *p - vertices[0];

    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-6 {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    Some((u, v, w))
}

/// Screen-space linear interpolation, for window depth.
pub fn interpolate_depth(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> f32 {
    let (u, v, w) = bary;
    points[0].z * u + points[1].z * v + points[2].z * w
}

/// Attributes interpolated with perspective correction.
pub struct Interpolated {
    pub world_pos: Vec3<f32>,
    pub normal: Vec3<f32>,
    pub uv: Vec2<f32>,
    pub color: Vec3<f32>,
}

pub fn interpolate_attributes(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> Interpolated {
    let (u, v, w) = bary;
    let (a, b, c) = (u * points[0].inv_w, v * points[1].inv_w, w * points[2].inv_w);
    let sum = a + b + c;
    let (a, b, c) = if sum.abs() > f32::EPSILON {
        (a / sum, b / sum, c / sum)
    } else {
        (u, v, w)
    };

    Interpolated {
        world_pos: points[0].world_pos * a + points[1].world_pos * b + points[2].world_pos * c,
        normal: points[0].normal * a + points[1].normal * b + points[2].normal * c,
        uv: points[0].uv * a + points[1].uv * b + points[2].uv * c,
        color: points[0].color * a + points[1].color * b + points[2].color * c,
    }
}

/// Pixel bounds of the triangle, clamped to a `width` x `height` target.
/// Returns `None` when the triangle is entirely off screen.
pub fn get_box(vertices: &[Vec2<f32>; 3], width: usize, height: usize) -> Option<(i32, i32, i32, i32)> {
    let mut min_x = vertices[0].x;
    let mut max_x = vertices[0].x;
    let mut min_y = vertices[0].y;
    let mut max_y = vertices[0].y;

    for v in vertices.iter().skip(1) {
        min_x = min_x.min(v.x);
        max_x = max_x.max(v.x);
        min_y = min_y.min(v.y);
        max_y = max_y.max(v.y);
    }

    let min_x = (min_x.floor() as i32).max(0);
    let min_y = (min_y.floor() as i32).max(0);
    let max_x = (max_x.ceil() as i32).min(width as i32 - 1);
    let max_y = (max_y.ceil() as i32).min(height as i32 - 1);

    (min_x <= max_x && min_y <= max_y).then_some((min_x, min_y, max_x, max_y))
}

/// Either winding is accepted.
pub fn is_inside_triangle(vertices: &[Vec2<f32>; 3], p: &Vec2<f32>) -> bool {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[1];
    let v2 = vertices[0] - vertices[2];

    let p0 = *p - vertices[0];
    let p1 = *p - vertices[1];
    let p2 = *p - vertices[2];

    let cross0 = v0.x * p0.y - v0.y * p0.x;
    let cross1 = v1.x * p1.y - v1.y * p1.x;
    let cross2 = v2.x * p2.y - v2.y * p2.x;

    (cross0 >= 0.0 && cross1 >= 0.0 && cross2 >= 0.0)
        || (cross0 <= 0.0 && cross1 <= 0.0 && cross2 <= 0.0)
}

/// Twice the signed area; positive when the vertices run counter-clockwise
/// on screen (y down).
pub fn signed_area(vertices: &[Vec2<f32>; 3]) -> f32 {
    let a = vertices[1] - vertices[0];
    let b = vertices[2] - vertices[0];
    -(a.x * b.y - a.y * b.x)
}
