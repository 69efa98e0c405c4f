use cgmath::{ortho, Matrix4, SquareMatrix, Vector3};

/// Maps pixel coordinates onto clip space, with the origin in the bottom left
/// corner of a `width` by `height` window.
pub fn window_projection(width: f32, height: f32) -> Matrix4<f32> {
    ortho(0.0, width, 0.0, height, -1.0, 1.0)
}

/// `proj * view * model`, where the model matrix is a plain translation.
/// Vertices get transformed right to left: model first, projection last.
pub fn mvp(proj: &Matrix4<f32>, view: &Matrix4<f32>, translation: Vector3<f32>) -> Matrix4<f32> {
    proj * view * Matrix4::from_translation(translation)
}

/// A view for a camera sitting at `camera`. Moving the camera right is
/// the same as moving everything else left.
pub fn camera_view(camera: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(-camera)
}

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Vector4, Zero};

    #[test]
    fn projection_maps_corners_to_clip_space() {
        let proj = window_projection(960.0, 540.0);

        let origin = proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin, Vector4::new(-1.0, -1.0, 0.0, 1.0));

        let corner = proj * Vector4::new(960.0, 540.0, 0.0, 1.0);
        assert_relative_eq!(corner, Vector4::new(1.0, 1.0, 0.0, 1.0));

        let center = proj * Vector4::new(480.0, 270.0, 0.0, 1.0);
        assert_relative_eq!(center, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn mvp_applies_model_then_view() {
        let proj = identity();
        let view = camera_view(Vector3::new(100.0, 0.0, 0.0));
        let m = mvp(&proj, &view, Vector3::new(200.0, 200.0, 0.0));

        let p = m * Vector4::new(1.0, 2.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(101.0, 202.0, 0.0, 1.0));
    }

    #[test]
    fn zero_translation_is_projection_times_view() {
        let proj = window_projection(960.0, 540.0);
        let view = identity();
        assert_relative_eq!(mvp(&proj, &view, Vector3::zero()), proj);
    }
}
