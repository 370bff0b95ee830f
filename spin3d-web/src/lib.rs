/// spin3d Web - WebGL2 frontend for the rotating-cube demos
///
/// Drives the same cube geometry and render configuration as the terminal
/// frontend, but on a browser canvas: one-time context/shader/buffer setup,
/// then a requestAnimationFrame chain that resubmits the rotation vector and
/// projection matrix every frame.
use std::cell::RefCell;
use std::rc::Rc;

use spin3d_core::{
    flatten, Camera, Cube, LightingProducts, RenderConfig, RenderMode, RotationState,
    EDGE_VERTEX_COUNT, FACE_VERTEX_COUNT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

mod shaders;

struct RenderState {
    gl: Gl,
    canvas: HtmlCanvasElement,
    config: RenderConfig,
    camera: Camera,
    rotation: RotationState,
    theta_loc: WebGlUniformLocation,
    projection_loc: WebGlUniformLocation,
    color_loc: Option<WebGlUniformLocation>,
    face_color: [f32; 4],
    edge_color: [f32; 4],
    running: bool,
}

/// Rotating-cube renderer bound to a canvas element.
///
/// Construction performs all one-time setup; `start` and `stop` control the
/// animation-frame chain. A failed context acquisition is fatal: the
/// constructor returns the error to the page and nothing is scheduled.
#[wasm_bindgen]
pub struct WebRenderer {
    state: Rc<RefCell<RenderState>>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Set up the renderer on the canvas with the given id. `mode` is
    /// "blended" or "shaded".
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, mode: &str) -> Result<WebRenderer, JsValue> {
        let mode = RenderMode::parse(mode)
            .ok_or_else(|| JsValue::from_str("unknown mode, expected 'blended' or 'shaded'"))?;
        let config = RenderConfig::for_mode(mode);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;

        let gl = canvas
            .get_context("webgl2")
            .map_err(|_| fatal("WebGL2 context request failed"))?
            .ok_or_else(|| fatal("WebGL2 isn't available"))?
            .dyn_into::<Gl>()
            .map_err(|_| fatal("WebGL2 isn't available"))?;

        let mut cube = Cube::new(1.0);
        cube.color_faces = spin3d_core::render::BLENDED_FACE_COLOR.into();
        cube.color_edges = spin3d_core::render::EDGE_COLOR.into();

        let camera = Camera::new(canvas.width().max(1), canvas.height().max(1));

        // Shader program
        let (vertex_src, fragment_src) = shaders::source_for(mode);
        let program = link_program(&gl, &vertex_src, fragment_src)?;
        gl.use_program(Some(&program));

        // Fixed pipeline state
        let clear = spin3d_core::render::CLEAR_COLOR;
        gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
        if config.blend {
            gl.enable(Gl::BLEND);
            gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
        }
        if config.depth_test {
            gl.enable(Gl::DEPTH_TEST);
        } else {
            gl.disable(Gl::DEPTH_TEST);
        }

        // The view matrix never changes; upload it once.
        let model_view_loc = uniform(&gl, &program, "modelViewMatrix")?;
        gl.uniform_matrix4fv_with_f32_array(
            Some(&model_view_loc),
            false,
            camera.view_matrix().as_slice(),
        );

        // Static vertex streams, uploaded once. The blended variant packs the
        // line stream behind the triangle stream in one buffer and addresses
        // it by offset.
        let mut points = cube.faces_as_triangles();
        if config.draw_edges {
            points.extend(cube.edges_as_line_segments());
        }
        upload_attribute(&gl, &program, "vPosition", &flatten(&points))?;

        if config.shaded {
            upload_attribute(&gl, &program, "vNormal", &flatten(&cube.face_normals()))?;

            let products = LightingProducts::default();
            gl.uniform4fv_with_f32_array(
                Some(&uniform(&gl, &program, "lightPosition")?),
                products.light_position.as_slice(),
            );
            gl.uniform4fv_with_f32_array(
                Some(&uniform(&gl, &program, "ambientProduct")?),
                products.ambient.as_slice(),
            );
            gl.uniform4fv_with_f32_array(
                Some(&uniform(&gl, &program, "diffuseProduct")?),
                products.diffuse.as_slice(),
            );
            gl.uniform4fv_with_f32_array(
                Some(&uniform(&gl, &program, "specularProduct")?),
                products.specular.as_slice(),
            );
            gl.uniform1f(
                Some(&uniform(&gl, &program, "shininess")?),
                products.shininess,
            );
        }

        let theta_loc = uniform(&gl, &program, "theta")?;
        let projection_loc = uniform(&gl, &program, "projectionMatrix")?;
        let color_loc = if config.shaded {
            None
        } else {
            Some(uniform(&gl, &program, "fColor")?)
        };

        Ok(WebRenderer {
            state: Rc::new(RefCell::new(RenderState {
                gl,
                canvas,
                config,
                camera,
                rotation: RotationState::zero(),
                theta_loc,
                projection_loc,
                color_loc,
                face_color: cube.color_faces.into(),
                edge_color: cube.color_edges.into(),
                running: false,
            })),
        })
    }

    /// Kick off the animation-frame chain. A no-op when already running.
    pub fn start(&self) -> Result<(), JsValue> {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return Ok(());
            }
            state.running = true;
        }

        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let chain = callback.clone();
        let state = self.state.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            {
                let mut state = state.borrow_mut();
                if !state.running {
                    // Not rescheduling parks the chain; a later start() builds
                    // a fresh one.
                    return;
                }
                state.render_frame();
            }
            if let Some(closure) = chain.borrow().as_ref() {
                if let Err(e) = request_animation_frame(closure) {
                    web_sys::console::error_1(&e);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(closure) = callback.borrow().as_ref() {
            request_animation_frame(closure)?;
        }
        Ok(())
    }

    /// Stop hook for teardown: the chain observes the flag and stops
    /// rescheduling after the current frame.
    pub fn stop(&self) {
        self.state.borrow_mut().running = false;
    }
}

impl RenderState {
    fn render_frame(&mut self) {
        let gl = &self.gl;

        // Track CSS-driven canvas resizes
        let display_width = self.canvas.client_width().max(1) as u32;
        let display_height = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() != display_width || self.canvas.height() != display_height {
            self.canvas.set_width(display_width);
            self.canvas.set_height(display_height);
        }
        gl.viewport(0, 0, display_width as i32, display_height as i32);

        let mut mask = Gl::COLOR_BUFFER_BIT;
        if self.config.depth_test {
            mask |= Gl::DEPTH_BUFFER_BIT;
        }
        gl.clear(mask);

        let [dx, dy, dz] = self.config.rotation_delta;
        self.rotation.advance(dx, dy, dz);
        gl.uniform3fv_with_f32_array(Some(&self.theta_loc), &self.rotation.as_array());

        self.camera.set_viewport(display_width, display_height);
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.projection_loc),
            false,
            self.camera.projection_matrix().as_slice(),
        );

        if let Some(color_loc) = &self.color_loc {
            gl.uniform4fv_with_f32_array(Some(color_loc), &self.face_color);
        }
        gl.draw_arrays(Gl::TRIANGLES, 0, FACE_VERTEX_COUNT as i32);

        // Edge pass after the faces so the segments stay visible through the
        // blended fill.
        if self.config.draw_edges {
            if let Some(color_loc) = &self.color_loc {
                gl.uniform4fv_with_f32_array(Some(color_loc), &self.edge_color);
            }
            gl.draw_arrays(
                Gl::LINES,
                FACE_VERTEX_COUNT as i32,
                EDGE_VERTEX_COUNT as i32,
            );
        }
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no global window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Fatal initialization failures also land in the console so the condition
/// is visible even when the page swallows the exception.
fn fatal(message: &str) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(message));
    JsValue::from_str(message)
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("uniform '{name}' not found")))
}

/// Create a static buffer for `data`, bind it to the named attribute as
/// 4-component floats, and enable the attribute.
fn upload_attribute(
    gl: &Gl,
    program: &WebGlProgram,
    name: &str,
    data: &[f32],
) -> Result<(), JsValue> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("failed to create buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, bytemuck::cast_slice(data), Gl::STATIC_DRAW);

    let location = gl.get_attrib_location(program, name);
    if location < 0 {
        return Err(JsValue::from_str(&format!("attribute '{name}' not found")));
    }
    gl.vertex_attrib_pointer_with_i32(location as u32, 4, Gl::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(location as u32);
    Ok(())
}

fn compile_shader(gl: &Gl, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| JsValue::from_str("failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader compile error".into());
        Err(fatal(&log))
    }
}

fn link_program(gl: &Gl, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, Gl::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment_src)?;

    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("failed to create program"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program link error".into());
        Err(fatal(&log))
    }
}
