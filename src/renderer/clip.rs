use crate::vertex::ClipSpaceVertex;

pub trait Clipper {
    /// Clips a clip-space triangle. The result holds zero or more triangles.
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]>;

    /// Clips a clip-space segment, `None` when nothing is left.
    fn clip_line(&self, a: &ClipSpaceVertex, b: &ClipSpaceVertex) -> Option<(ClipSpaceVertex, ClipSpaceVertex)>;
}

/// Sutherland-Hodgman against the near plane (`z >= -w`). The other planes
/// are left to the rasterizer's screen bounds.
pub struct NearPlaneClipper;

fn near_distance(v: &ClipSpaceVertex) -> f32 {
    v.position.z + v.position.w
}

impl Clipper for NearPlaneClipper {
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]> {
        let d = triangle.map(|v| near_distance(&v));
        if d.iter().all(|&d| d >= 0.0) {
            return vec![*triangle];
        }
        if d.iter().all(|&d| d < 0.0) {
            return vec![];
        }

        let mut polygon: Vec<ClipSpaceVertex> = Vec::with_capacity(4);
        for i in 0..3 {
            let j = (i + 1) % 3;
            let (current, next) = (&triangle[i], &triangle[j]);
            if d[i] >= 0.0 {
                polygon.push(*current);
            }
            if (d[i] >= 0.0) != (d[j] >= 0.0) {
                let t = d[i] / (d[i] - d[j]);
                polygon.push(current.lerp(next, t));
            }
        }

        // fan
        (1..polygon.len().saturating_sub(1))
            .map(|i| [polygon[0], polygon[i], polygon[i + 1]])
            .collect()
    }

    fn clip_line(&self, a: &ClipSpaceVertex, b: &ClipSpaceVertex) -> Option<(ClipSpaceVertex, ClipSpaceVertex)> {
        let (da, db) = (near_distance(a), near_distance(b));
        match (da >= 0.0, db >= 0.0) {
            (true, true) => Some((*a, *b)),
            (false, false) => None,
            (true, false) => Some((*a, a.lerp(b, da / (da - db)))),
            (false, true) => Some((a.lerp(b, da / (da - db)), *b)),
        }
    }
}
