/// Blinn-Phong lighting inputs for the shaded demo
use nalgebra::{Vector3, Vector4};

/// A single point light.
#[derive(Debug, Clone)]
pub struct Light {
    pub position: Vector4<f32>,
    pub ambient: Vector4<f32>,
    pub diffuse: Vector4<f32>,
    pub specular: Vector4<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector4::new(-1.5, 2.0, 4.0, 1.0),
            ambient: Vector4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vector4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Surface material of the cube.
#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Vector4<f32>,
    pub diffuse: Vector4<f32>,
    pub specular: Vector4<f32>,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vector4::new(0.0, 1.0, 0.0, 1.0),
            diffuse: Vector4::new(0.4, 0.8, 0.4, 1.0),
            specular: Vector4::new(0.0, 0.4, 0.4, 1.0),
            shininess: 300.0,
        }
    }
}

/// Precomputed light-material products, the uniforms the shaded pass
/// consumes. Computed once at initialization; neither light nor material
/// changes per frame.
#[derive(Debug, Clone)]
pub struct LightingProducts {
    pub light_position: Vector4<f32>,
    pub ambient: Vector4<f32>,
    pub diffuse: Vector4<f32>,
    pub specular: Vector4<f32>,
    pub shininess: f32,
}

impl LightingProducts {
    pub fn new(light: &Light, material: &Material) -> Self {
        Self {
            light_position: light.position,
            ambient: light.ambient.component_mul(&material.ambient),
            diffuse: light.diffuse.component_mul(&material.diffuse),
            specular: light.specular.component_mul(&material.specular),
            shininess: material.shininess,
        }
    }
}

impl LightingProducts {
    /// Evaluate the Blinn-Phong model for one surface sample, mirroring the
    /// shaded fragment shader. Hosts that shade on the CPU call this per
    /// face; the normal must already be in world space.
    pub fn shade(
        &self,
        position: &Vector3<f32>,
        normal: &Vector3<f32>,
        eye: &Vector3<f32>,
    ) -> Vector4<f32> {
        let n = normal.normalize();
        let l = (self.light_position.xyz() - position).normalize();
        let e = (eye - position).normalize();
        let h = (l + e).normalize();

        let nl = n.dot(&l);
        let kd = nl.max(0.0);
        // No specular highlight when the light is behind the surface.
        let ks = if nl < 0.0 {
            0.0
        } else {
            n.dot(&h).max(0.0).powf(self.shininess)
        };

        let mut color = self.ambient + self.diffuse * kd + self.specular * ks;
        color.w = 1.0;
        color
    }
}

impl Default for LightingProducts {
    fn default() -> Self {
        Self::new(&Light::default(), &Material::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_are_component_wise() {
        let light = Light {
            ambient: Vector4::new(0.5, 0.5, 0.5, 1.0),
            ..Light::default()
        };
        let material = Material {
            ambient: Vector4::new(0.2, 0.4, 0.8, 1.0),
            ..Material::default()
        };
        let products = LightingProducts::new(&light, &material);
        assert_eq!(products.ambient, Vector4::new(0.1, 0.2, 0.4, 1.0));
        assert_eq!(products.shininess, material.shininess);
        assert_eq!(products.light_position, light.position);
    }

    #[test]
    fn lit_face_is_brighter_than_unlit() {
        let products = LightingProducts::default();
        let eye = Vector3::new(0.0, 0.0, 2.0);
        let position = Vector3::new(0.0, 0.0, 0.5);
        let toward = products.shade(&position, &Vector3::new(0.0, 0.0, 1.0), &eye);
        let away = products.shade(&position, &Vector3::new(0.0, 0.0, -1.0), &eye);
        assert!(toward.xyz().sum() > away.xyz().sum());
        // A surface facing away from the light only receives ambient.
        assert!((away.xyz() - products.ambient.xyz()).norm() < 1e-6);
        assert_eq!(toward.w, 1.0);
    }

    #[test]
    fn default_diffuse_is_material_diffuse() {
        // The default light is white, so the diffuse product equals the
        // material diffuse.
        let products = LightingProducts::default();
        assert_eq!(products.diffuse, Material::default().diffuse);
    }
}
