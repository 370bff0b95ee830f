/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Camera configuration for the cube demos.
///
/// The defaults match the demo viewpoint: eye at (0, 0, 2) looking at the
/// origin, 55 degree field of view, near 0.3, far 5.0. Only the aspect ratio
/// changes at runtime; it is re-derived from the surface size every frame so
/// resizes are picked up without reinitialization.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 2.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 55.0f32.to_radians(),
            aspect: width as f32 / height as f32,
            near: 0.3,
            far: 5.0,
        }
    }

    /// Re-derive the aspect ratio from the current surface dimensions.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Project a homogeneous point through a model-view-projection matrix into
/// screen space.
///
/// Returns `(x, y, depth)` with depth in normalized device coordinates, or
/// `None` when the point lands outside the viewport or the perspective
/// divide would be degenerate.
pub fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Vector4<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = mvp * point;

    if clip.w.abs() < 1e-6 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let ndc_z = clip.z / clip.w;

    // Clip test
    if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
        return None;
    }

    // Convert to screen space
    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, ndc_z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_aspect_tracks_viewport() {
        let mut camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        camera.set_viewport(1000, 500);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let mut camera = Camera::new(100, 100);
        camera.set_viewport(640, 640); // aspect 1.0
        let projection = camera.projection_matrix();

        assert!(projection.determinant().abs() > 1e-6);

        // Points on the view-space near/far planes land on the NDC depth
        // extremes under the OpenGL convention.
        let near = projection * Vector4::new(0.0, 0.0, -camera.near, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);

        let far = projection * Vector4::new(0.0, 0.0, -camera.far, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::new(200, 100);
        let mvp = camera.projection_matrix() * camera.view_matrix();
        let (x, y, depth) = project_to_screen(&mvp, &Vector4::new(0.0, 0.0, 0.0, 1.0), 200, 100)
            .expect("origin is in view");
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn degenerate_w_is_rejected() {
        let camera = Camera::new(100, 100);
        let mvp = camera.projection_matrix() * camera.view_matrix();
        // A point at the eye produces w ~ 0 in clip space.
        let at_eye = Vector4::new(0.0, 0.0, 2.0, 1.0);
        assert!(project_to_screen(&mvp, &at_eye, 100, 100).is_none());
    }
}
