/// Terminal frontend for the rotating-cube demos
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::{Matrix4, Vector4};
use spin3d_core::{Camera, Cube, LightingProducts, RenderConfig, RotationState, Transform};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Errors surfaced by the terminal host.
///
/// Context acquisition failures are fatal and happen before the frame loop;
/// there is no retry path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to acquire terminal context: {0}")]
    Context(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Main application struct for terminal rendering.
///
/// Owns all per-session state the render loop touches: the static geometry
/// streams, rotation state, camera, and rasterizer. The geometry is computed
/// once here and never mutated afterwards.
pub struct TerminalApp {
    triangles: Vec<Vector4<f32>>,
    normals: Vec<Vector4<f32>>,
    edges: Vec<Vector4<f32>>,
    face_style: (char, Color),
    edge_style: (char, Color),
    config: RenderConfig,
    lighting: LightingProducts,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(cube: Cube, config: RenderConfig) -> Result<Self, AppError> {
        let (width, height) = terminal::size().map_err(AppError::Context)?;

        let triangles = cube.faces_as_triangles();
        let normals = if config.shaded {
            cube.face_normals()
        } else {
            Vec::new()
        };
        let edges = if config.draw_edges {
            cube.edges_as_line_segments()
        } else {
            Vec::new()
        };

        Ok(Self {
            triangles,
            normals,
            edges,
            face_style: style_for(&cube.color_faces),
            edge_style: style_for(&cube.color_edges),
            renderer: AsciiRenderer::new(width as usize, height as usize, config.depth_test),
            config,
            lighting: LightingProducts::default(),
            rotation: RotationState::zero(),
            camera: Camera::new(width as u32, height as u32),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Request the loop to end after the current frame.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode().map_err(AppError::Context)?;
        if let Err(e) = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(AppError::Context(e));
        }
        log::info!("terminal context acquired, entering frame loop");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        log::info!("terminal restored");

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS tick

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            let [dx, dy, dz] = self.config.rotation_delta;
            self.rotation.advance(dx, dy, dz);

            // Track terminal resizes
            let (width, height) = terminal::size()?;
            if (width as usize, height as usize) != self.renderer.size() {
                self.renderer.resize(width as usize, height as usize);
            }
            self.camera.set_viewport(width as u32, height as u32);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<(), AppError> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.stop(),
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), AppError> {
        let model = Transform::rotation_matrix(&self.rotation);
        let mvp = Transform::mvp_matrix(
            &model,
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(),
        );

        self.renderer.clear();

        // Face pass: 12 triangles
        for (i, triangle) in self.triangles.chunks_exact(3).enumerate() {
            let (ch, color) = if self.config.shaded {
                self.shaded_style(i, triangle, &model)
            } else {
                self.face_style
            };
            self.renderer.draw_triangle(&mvp, triangle, ch, color);
        }

        // Edge pass, after the faces so the segments stay on top
        if self.config.draw_edges {
            let (ch, color) = self.edge_style;
            for segment in self.edges.chunks_exact(2) {
                self.renderer
                    .draw_segment(&mvp, &segment[0], &segment[1], ch, color);
            }
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Status overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("spin3d | FPS: {:.1} | Q to quit", self.fps)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    /// Per-face Blinn-Phong evaluation, the CPU stand-in for the shaded
    /// fragment shader.
    fn shaded_style(
        &self,
        triangle_index: usize,
        triangle: &[Vector4<f32>],
        model: &Matrix4<f32>,
    ) -> (char, Color) {
        let normal = (model * self.normals[triangle_index * 3]).xyz();
        let centroid = (model * (triangle[0] + triangle[1] + triangle[2]) / 3.0).xyz();
        let eye = self.camera.position.coords;

        let color = self.lighting.shade(&centroid, &normal, &eye);
        let brightness = luminance(&color).clamp(0.0, 1.0);

        let ramp = renderer::LUMINOSITY_RAMP;
        let index = ((brightness * (ramp.len() - 1) as f32) as usize).min(ramp.len() - 1);
        (ramp[index], brightness_color(brightness))
    }
}

fn luminance(color: &Vector4<f32>) -> f32 {
    0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z
}

fn brightness_color(brightness: f32) -> Color {
    if brightness < 0.25 {
        Color::DarkGrey
    } else if brightness < 0.5 {
        Color::DarkGreen
    } else if brightness < 0.75 {
        Color::Green
    } else {
        Color::White
    }
}

/// Map an RGBA draw color to a terminal style: the alpha channel picks the
/// fill character off the luminosity ramp (translucency reads as a sparse
/// fill), the RGB channels pick the nearest basic color.
fn style_for(color: &Vector4<f32>) -> (char, Color) {
    let ramp = renderer::LUMINOSITY_RAMP;
    let index = ((color.w.clamp(0.0, 1.0) * (ramp.len() - 1) as f32) as usize).min(ramp.len() - 1);

    let terminal_color = match (color.x > 0.5, color.y > 0.5, color.z > 0.5) {
        (true, true, true) => Color::White,
        (true, false, false) => Color::Red,
        (false, true, false) => Color::Green,
        (false, false, true) => Color::Blue,
        (true, true, false) => Color::Yellow,
        (false, true, true) => Color::Cyan,
        (true, false, true) => Color::Magenta,
        (false, false, false) => Color::Grey,
    };

    (ramp[index], terminal_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_maps_alpha_to_ramp() {
        // The blended demo's translucent green becomes a sparse green fill.
        let (ch, color) = style_for(&Vector4::new(0.0, 1.0, 0.0, 0.3));
        assert_eq!(ch, ':');
        assert_eq!(color, Color::Green);

        // Opaque white becomes the densest character.
        let (ch, color) = style_for(&Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(ch, '@');
        assert_eq!(color, Color::White);
    }

    #[test]
    fn brightness_bands_are_ordered() {
        assert_eq!(brightness_color(0.1), Color::DarkGrey);
        assert_eq!(brightness_color(0.4), Color::DarkGreen);
        assert_eq!(brightness_color(0.6), Color::Green);
        assert_eq!(brightness_color(0.9), Color::White);
    }
}
