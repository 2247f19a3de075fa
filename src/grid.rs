use cgmath::{Vector3 as Vec3, Vector4 as Vec4};

/// Flat square grid of lines at a fixed height.
#[derive(Debug, Clone)]
pub struct Grid {
    vertices: Vec<Vec3<f32>>,
    pub colour: Vec4<f32>,
}

impl Grid {
    /// `height` is the grid's location on the Y axis. Each axis gets
    /// `divisions + 1` lines.
    pub fn new(width: f32, depth: f32, height: f32, divisions: usize) -> Self {
        let num_verts = divisions * 4 + 4;
        let half_num_verts = num_verts / 2;

        let half_width = width / 2.0;
        let half_depth = depth / 2.0;
        let x_step = width / divisions as f32;
        let z_step = depth / divisions as f32;

        let mut vertices = Vec::with_capacity(num_verts);

        // near-to-far lines, stepping along X
        let mut x = -half_width;
        for _ in (0..half_num_verts).step_by(2) {
            vertices.push(Vec3::new(x, height, -half_depth));
            vertices.push(Vec3::new(x, height, half_depth));
            x += x_step;
        }

        // left-to-right lines, stepping along Z
        let mut z = -half_depth;
        for _ in (half_num_verts..num_verts).step_by(2) {
            vertices.push(Vec3::new(-half_width, height, z));
            vertices.push(Vec3::new(half_width, height, z));
            z += z_step;
        }

        Self {
            vertices,
            colour: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    pub fn num_verts(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vec3<f32>] {
        &self.vertices
    }

    /// Endpoint pairs, one per line.
    pub fn lines(&self) -> impl Iterator<Item = (Vec3<f32>, Vec3<f32>)> + '_ {
        self.vertices.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_and_extent() {
        let grid = Grid::new(500.0, 500.0, -50.0, 20);
        assert_eq!(grid.num_verts(), 84);
        assert_eq!(grid.lines().count(), 42);
        assert!(grid.vertices().iter().all(|v| v.y == -50.0));

        let first = grid.vertices()[0];
        assert_eq!(first, Vec3::new(-250.0, -50.0, -250.0));
        let last_x_line = grid.vertices()[41];
        assert!((last_x_line.x - 250.0).abs() < 1e-3);
        assert_eq!(last_x_line.z, 250.0);

        let first_z_line = grid.vertices()[42];
        assert_eq!(first_z_line, Vec3::new(-250.0, -50.0, -250.0));
        let last = grid.vertices()[83];
        assert_eq!(last.x, 250.0);
        assert!((last.z - 250.0).abs() < 1e-3);
    }
}
