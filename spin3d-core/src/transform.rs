/// Rotation state and model-matrix construction
use nalgebra::{Matrix4, Vector3};

/// Rotation angles around the three axes, in degrees.
///
/// Components stay within (-360, 360]: a single wrap step is applied after
/// each advance, mirroring the per-frame increment-then-wrap of the demos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Advance by per-frame deltas (in degrees), wrapping at 360.
    pub fn advance(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x = wrap_degrees(self.x + dx);
        self.y = wrap_degrees(self.y + dy);
        self.z = wrap_degrees(self.z + dz);
    }

    /// The angles as a flat array, the uniform layout the shaders consume.
    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    if angle > 360.0 {
        angle - 360.0
    } else if angle < -360.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a model matrix from a rotation state.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x.to_radians(), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y.to_radians(), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z.to_radians()));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut state = RotationState::zero();
        state.advance(0.5, 1.0, 0.0);
        state.advance(0.5, 1.0, 0.0);
        assert!((state.x - 1.0).abs() < 1e-6);
        assert!((state.y - 2.0).abs() < 1e-6);
        assert_eq!(state.z, 0.0);
    }

    #[test]
    fn advance_wraps_past_360() {
        let mut state = RotationState::new(0.0, 359.6, 0.0);
        state.advance(0.0, 1.0, 0.0);
        assert!((state.y - 0.6).abs() < 1e-4);
    }

    #[test]
    fn identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn quarter_turn_maps_x_to_minus_z() {
        // 90 degrees around Y sends +X to -Z in a right-handed frame.
        let rotation = RotationState::new(0.0, 90.0, 0.0);
        let matrix = Transform::rotation_matrix(&rotation);
        let v = matrix * nalgebra::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.z + 1.0).abs() < 1e-6);
    }
}
