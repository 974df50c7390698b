use cabin_scene::data_structures::transform::{Transform, model_matrix};
use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};

fn assert_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    let diff = actual - expected;
    let max = diff.x.abs().max(diff.y.abs()).max(diff.z.abs()).max(diff.w.abs());
    assert!(max < 1e-5, "expected {expected:?}, got {actual:?}");
}

#[test]
fn should_be_identity_by_default() {
    let matrix: Matrix4<f32> = Transform::default().into();
    assert_eq!(matrix, Matrix4::identity());
}

#[test]
fn should_rotate_about_x_in_degrees_then_translate() {
    let matrix = model_matrix(
        Vector3::new(1.0, 1.0, 1.0),
        90.0,
        0.0,
        0.0,
        Vector3::new(1.0, 2.0, 3.0),
    );

    assert_close(matrix * Vector4::new(0.0, 1.0, 0.0, 1.0), Vector4::new(1.0, 2.0, 4.0, 1.0));
}

#[test]
fn should_scale_before_rotating() {
    let matrix = model_matrix(
        Vector3::new(2.0, 1.0, 1.0),
        0.0,
        0.0,
        90.0,
        Vector3::new(1.0, 0.0, 0.0),
    );

    // scaled to (2, 0, 0), rotated onto +Y, then shifted along X
    assert_close(matrix * Vector4::new(1.0, 0.0, 0.0, 1.0), Vector4::new(1.0, 2.0, 0.0, 1.0));
}

#[test]
fn should_apply_x_rotation_before_z() {
    let transform = Transform {
        rotation_x: 90.0,
        rotation_z: 90.0,
        ..Transform::new()
    };

    // X takes +Y to +Z, which Z leaves alone
    assert_close(
        transform.to_matrix() * Vector4::new(0.0, 1.0, 0.0, 1.0),
        Vector4::new(0.0, 0.0, 1.0, 1.0),
    );
}
