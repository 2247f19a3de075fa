use cgmath::{Vector3 as Vec3, Vector4 as Vec4};

/// Coloured 3D line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Vec3<f32>,
    pub p2: Vec3<f32>,
    /// RGBA in [0, 1].
    pub colour: Vec4<f32>,
    /// Pixels.
    pub width: f32,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            p1: Vec3::new(0.0, 0.0, 0.0),
            p2: Vec3::new(1.0, 1.0, 1.0),
            colour: Vec4::new(1.0, 1.0, 1.0, 1.0),
            width: 1.0,
        }
    }
}

impl Line {
    pub fn new(p1: Vec3<f32>, p2: Vec3<f32>, colour: Vec4<f32>, width: f32) -> Self {
        Self {
            p1,
            p2,
            colour,
            width,
        }
    }


    /// Red X, green Y and blue Z axes of the given length from the origin.
    pub fn axes(length: f32, width: f32) -> [Line; 3] {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        [
            Line::new(origin, Vec3::new(length, 0.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 1.0), width),
            Line::new(origin, Vec3::new(0.0, length, 0.0), Vec4::new(0.0, 1.0, 0.0, 1.0), width),
            Line::new(origin, Vec3::new(0.0, 0.0, length), Vec4::new(0.0, 0.0, 1.0, 1.0), width),
        ]
    }
}

/// Coloured point drawn as a square of `size` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub location: Vec3<f32>,
    pub colour: Vec4<f32>,
    pub size: f32,
}

impl Point {
    pub fn new(location: Vec3<f32>, colour: Vec4<f32>, size: f32) -> Self {
        Self {
            location,
            colour,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_coloured_by_direction() {
        let axes = Line::axes(100.0, 2.0);
        assert_eq!(axes[0].p2, Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(axes[1].colour, Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(axes[2].width, 2.0);
    }

    #[test]
    fn default_line_is_a_white_unit_diagonal() {
        let line = Line::default();
        assert_eq!(line.p2 - line.p1, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(line.colour, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(line.width, 1.0);
    }
}
