use cgmath::{InnerSpace, Vector3 as Vec3, Vector4 as Vec4};
use rs_basecode::camera::{Camera, Movement};
use rs_basecode::config::ProjectionConfig;
use rs_basecode::grid::Grid;
use rs_basecode::projection::{FovMode, Projection};

#[test]
fn forward_at_rest_heads_down_negative_z() {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, 0.0));
    camera.handle_key(Movement::Forward, true);
    camera.move_camera(0.5);
    assert!((camera.position - Vec3::new(0.0, 0.0, -50.0)).magnitude() < 1e-4);

    camera.handle_key(Movement::Forward, false);
    camera.move_camera(0.5);
    assert!((camera.position.z + 50.0).abs() < 1e-4);
}

#[test]
fn diagonal_movement_is_not_faster() {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
    camera.handle_key(Movement::Forward, true);
    camera.handle_key(Movement::StrafeRight, true);
    camera.handle_key(Movement::Ascend, true);
    camera.move_camera(1.0);
    assert!((camera.position.magnitude() - camera.movement_speed).abs() < 1e-3);
}

#[test]
fn mouse_look_clamps_pitch_and_wraps_yaw() {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
    camera.handle_mouse_move(0.0, 10_000.0);
    assert_eq!(camera.rotation.x, 90.0);
    camera.handle_mouse_move(-100.0, 0.0);
    assert!((camera.rotation.y - 345.0).abs() < 1e-3);
}

#[test]
fn view_matrix_moves_the_world_opposite_the_camera() {
    let camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, 0.0));
    let origin = camera.get_view_mat() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((origin.truncate() - Vec3::new(0.0, 0.0, -50.0)).magnitude() < 1e-5);
}

#[test]
fn zoom_is_clamped_and_modes_differ_on_wide_windows() {
    let mut projection = Projection::new(1280, 720, &ProjectionConfig::default());
    assert_eq!(projection.mode(), FovMode::HorizontalPlus);
    projection.scroll(1000.0);
    assert!((projection.hfov_degs() - 10.0).abs() < 1e-3);
    projection.scroll(-1000.0);
    assert!((projection.hfov_degs() - 140.0).abs() < 1e-3);

    let mut vert_minus = Projection::new(
        800,
        800,
        &ProjectionConfig {
            mode: FovMode::VerticalMinus,
            ..ProjectionConfig::default()
        },
    );
    let hfov = vert_minus.hfov_degs();
    vert_minus.resize(1600, 800);
    assert!((vert_minus.hfov_degs() - hfov).abs() < 1e-3);
}

#[test]
fn grids_hold_endpoint_pairs_at_their_height() {
    let grid = Grid::new(500.0, 500.0, -50.0, 20);
    assert_eq!(grid.num_verts(), 84);
    assert_eq!(grid.lines().count(), 42);
    assert!(grid.vertices().iter().all(|v| v.y == -50.0));
}
