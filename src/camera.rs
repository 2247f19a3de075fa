use cgmath::{Deg, InnerSpace, Matrix4 as Mat4, Vector3 as Vec3, Zero};

use crate::config::CameraConfig;

/// OpenGL-style perspective matrix, right-handed, depth mapped to [-1, 1].
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    near: f32,
    far: f32,
    aspect: f32,
    fovy: f32,
    mat: Mat4<f32>,
}

impl Frustum {
    /// `fovy` is the vertical field of view in radians.
    #[rustfmt::skip]
    pub fn new(near: f32, aspect: f32, far: f32, fovy: f32) -> Self {
        let tan_half_fovy = (fovy / 2.0).tan();
        let a = 1.0 / (aspect * tan_half_fovy);
        let b = 1.0 / tan_half_fovy;
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        // column major
        let mat = Mat4::new(
            a,    0.0,   0.0,   0.0,
            0.0,  b,     0.0,   0.0,
            0.0,  0.0,   c,    -1.0,
            0.0,  0.0,   d,     0.0,
        );

        Self {
            near,
            far,
            aspect,
            fovy,
            mat,
        }
    }

    pub fn get_mat(&self) -> &Mat4<f32> {
        &self.mat
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }
}

/// Directions the camera can be flown in while a key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Holding {
    forward: bool,
    backward: bool,
    left_strafe: bool,
    right_strafe: bool,
    ascend: bool,
    descend: bool,
}

/// Free-fly camera. Rotation is in degrees: x is pitch, y is yaw, and a yaw
/// of 0 looks down negative Z.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3<f32>,
    pub rotation: Vec3<f32>,
    pub movement_speed: f32,
    pub pitch_sensitivity: f32,
    pub yaw_sensitivity: f32,
    holding: Holding,
}

impl Camera {
    pub fn new(position: Vec3<f32>, rotation_degs: Vec3<f32>) -> Self {
        Self {
            position,
            rotation: rotation_degs,
            movement_speed: 200.0,
            pitch_sensitivity: 0.15,
            yaw_sensitivity: 0.15,
            holding: Holding::default(),
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            movement_speed: config.speed,
            pitch_sensitivity: config.pitch_sensitivity,
            yaw_sensitivity: config.yaw_sensitivity,
            ..Self::new(config.position.into(), config.rotation.into())
        }
    }

    pub fn handle_key(&mut self, movement: Movement, pressed: bool) {
        let flag = match movement {
            Movement::Forward => &mut self.holding.forward,
            Movement::Backward => &mut self.holding.backward,
            Movement::StrafeLeft => &mut self.holding.left_strafe,
            Movement::StrafeRight => &mut self.holding.right_strafe,
            Movement::Ascend => &mut self.holding.ascend,
            Movement::Descend => &mut self.holding.descend,
        };
        *flag = pressed;
    }

    /// Stop all movement, e.g. when the window loses the keys mid-press.
    pub fn release_all(&mut self) {
        self.holding = Holding::default();
    }

    /// Applies a cursor offset in pixels. Pitch stays within [-90, 90] and yaw
    /// wraps into [0, 360).
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        self.rotation.x += dy * self.pitch_sensitivity;
        self.rotation.y += dx * self.yaw_sensitivity;

        self.rotation.x = self.rotation.x.clamp(-90.0, 90.0);
        self.rotation.y = self.rotation.y.rem_euclid(360.0);
    }

    /// Direction of travel for the held keys, unit length or zero.
    pub fn movement_direction(&self) -> Vec3<f32> {
        let (sin_x, cos_x) = self.rotation.x.to_radians().sin_cos();
        let (sin_y, cos_y) = self.rotation.y.to_radians().sin_cos();

        // cos(pitch) cancels horizontal travel when looking straight up or down
        let forward = Vec3::new(sin_y * cos_x, -sin_x, -cos_y * cos_x);
        let strafe = Vec3::new(cos_y, 0.0, sin_y);
        let up = Vec3::unit_y();

        let mut movement = Vec3::zero();
        if self.holding.forward {
            movement += forward;
        }
        if self.holding.backward {
            movement -= forward;
        }
        if self.holding.left_strafe {
            movement -= strafe;
        }
        if self.holding.right_strafe {
            movement += strafe;
        }
        if self.holding.ascend {
            movement += up;
        }
        if self.holding.descend {
            movement -= up;
        }

        if movement.magnitude2() > 0.0 {
            movement.normalize()
        } else {
            movement
        }
    }

    pub fn move_camera(&mut self, delta_time: f32) {
        self.position += self.movement_direction() * (self.movement_speed * delta_time);
    }

    pub fn get_view_mat(&self) -> Mat4<f32> {
        Mat4::from_angle_x(Deg(self.rotation.x))
            * Mat4::from_angle_y(Deg(self.rotation.y))
            * Mat4::from_translation(-self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    const EPS: f32 = 1e-4;

    #[test]
    fn pitch_clamps_and_yaw_wraps() {
        let mut camera = Camera::new(Vec3::zero(), Vec3::zero());
        camera.handle_mouse_move(0.0, 1000.0);
        assert_eq!(camera.rotation.x, 90.0);
        camera.handle_mouse_move(0.0, -2000.0);
        assert_eq!(camera.rotation.x, -90.0);

        camera.handle_mouse_move(-100.0, 0.0);
        assert!((camera.rotation.y - 345.0).abs() < EPS);
        camera.handle_mouse_move(200.0, 0.0);
        assert!((camera.rotation.y - 15.0).abs() < EPS);
    }

    #[test]
    fn forward_at_rest_is_negative_z() {
        let mut camera = Camera::new(Vec3::zero(), Vec3::zero());
        camera.handle_key(Movement::Forward, true);
        camera.move_camera(0.5);
        assert!((camera.position - Vec3::new(0.0, 0.0, -100.0)).magnitude() < EPS);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut camera = Camera::new(Vec3::zero(), Vec3::zero());
        camera.handle_key(Movement::Forward, true);
        camera.handle_key(Movement::StrafeRight, true);
        assert!((camera.movement_direction().magnitude() - 1.0).abs() < EPS);

        camera.handle_key(Movement::StrafeRight, false);
        camera.handle_key(Movement::Backward, true);
        assert_eq!(camera.movement_direction(), Vec3::zero());
    }

    #[test]
    fn releasing_all_keys_stops_the_camera() {
        let mut camera = Camera::new(Vec3::zero(), Vec3::zero());
        camera.handle_key(Movement::Forward, true);
        camera.handle_key(Movement::Ascend, true);
        camera.release_all();
        assert_eq!(camera.movement_direction(), Vec3::zero());
        camera.move_camera(1.0);
        assert_eq!(camera.position, Vec3::zero());
    }

    #[test]
    fn view_matrix_moves_the_world_opposite_to_the_camera() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::zero());
        let p = camera.get_view_mat().transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!((p.z + 50.0).abs() < EPS);
    }
}
