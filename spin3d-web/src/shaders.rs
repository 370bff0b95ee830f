/// GLSL ES 300 shader pairs for the two demo variants
///
/// Both vertex shaders rebuild the rotation matrices from the `theta` uniform
/// (degrees) every frame, so the host only resubmits three floats. The
/// model-view matrix is uploaded once at initialization.
use spin3d_core::RenderMode;

/// Shared rotation preamble: per-axis matrices from `theta`, composed Z.Y.X.
const ROTATION: &str = r#"
    vec3 angles = radians(theta);
    vec3 c = cos(angles);
    vec3 s = sin(angles);

    // Column-major constructors.
    mat4 rx = mat4(1.0, 0.0, 0.0, 0.0,
                   0.0, c.x, s.x, 0.0,
                   0.0, -s.x, c.x, 0.0,
                   0.0, 0.0, 0.0, 1.0);
    mat4 ry = mat4(c.y, 0.0, -s.y, 0.0,
                   0.0, 1.0, 0.0, 0.0,
                   s.y, 0.0, c.y, 0.0,
                   0.0, 0.0, 0.0, 1.0);
    mat4 rz = mat4(c.z, s.z, 0.0, 0.0,
                   -s.z, c.z, 0.0, 0.0,
                   0.0, 0.0, 1.0, 0.0,
                   0.0, 0.0, 0.0, 1.0);
    mat4 rotation = rz * ry * rx;
"#;

pub const FLAT_VERTEX: &str = r#"#version 300 es
in vec4 vPosition;

uniform vec3 theta;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;

void main() {
    //ROTATION//
    gl_Position = projectionMatrix * modelViewMatrix * rotation * vPosition;
}
"#;

pub const FLAT_FRAGMENT: &str = r#"#version 300 es
precision mediump float;

uniform vec4 fColor;

out vec4 outColor;

void main() {
    outColor = fColor;
}
"#;

pub const SHADED_VERTEX: &str = r#"#version 300 es
in vec4 vPosition;
in vec4 vNormal;

uniform vec3 theta;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
uniform vec4 lightPosition;

out vec3 fN;
out vec3 fE;
out vec3 fL;

void main() {
    //ROTATION//
    vec4 pos = modelViewMatrix * rotation * vPosition;

    fN = (modelViewMatrix * rotation * vNormal).xyz;
    fE = -pos.xyz;
    fL = (modelViewMatrix * lightPosition).xyz - pos.xyz;

    gl_Position = projectionMatrix * pos;
}
"#;

pub const SHADED_FRAGMENT: &str = r#"#version 300 es
precision mediump float;

in vec3 fN;
in vec3 fE;
in vec3 fL;

uniform vec4 ambientProduct;
uniform vec4 diffuseProduct;
uniform vec4 specularProduct;
uniform float shininess;

out vec4 outColor;

void main() {
    vec3 N = normalize(fN);
    vec3 E = normalize(fE);
    vec3 L = normalize(fL);
    vec3 H = normalize(L + E);

    float Kd = max(dot(L, N), 0.0);
    float Ks = pow(max(dot(N, H), 0.0), shininess);

    vec4 diffuse = Kd * diffuseProduct;
    vec4 specular = Ks * specularProduct;
    if (dot(L, N) < 0.0) {
        specular = vec4(0.0, 0.0, 0.0, 1.0);
    }

    outColor = ambientProduct + diffuse + specular;
    outColor.a = 1.0;
}
"#;

/// The (vertex, fragment) sources for a demo variant, with the rotation
/// preamble spliced in.
pub fn source_for(mode: RenderMode) -> (String, &'static str) {
    match mode {
        RenderMode::Blended => (FLAT_VERTEX.replace("//ROTATION//", ROTATION), FLAT_FRAGMENT),
        RenderMode::Shaded => (
            SHADED_VERTEX.replace("//ROTATION//", ROTATION),
            SHADED_FRAGMENT,
        ),
    }
}
