/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector4};
use spin3d_core::projection::project_to_screen;
use std::io::Write;

/// Character luminosity ramp (darkest to lightest)
pub const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Rasterizer that fills a character grid from projected geometry.
///
/// With depth testing disabled the grid behaves like a painter's canvas:
/// whatever is drawn last wins, which is how the blended variant keeps its
/// edges visible through the faces.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_test: bool,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, depth_test: bool) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_test,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    /// Reallocate the buffers for a new terminal size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let size = width * height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.cells = vec![EMPTY; size];
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Rasterize one triangle of the face stream.
    ///
    /// The triangle is dropped whole when any vertex projects outside the
    /// viewport; with the demo camera the cube never reaches the borders.
    pub fn draw_triangle(
        &mut self,
        mvp: &Matrix4<f32>,
        triangle: &[Vector4<f32>],
        ch: char,
        color: Color,
    ) {
        let mut screen = [(0.0f32, 0.0f32, 0.0f32); 3];
        for (corner, vertex) in screen.iter_mut().zip(triangle) {
            match project_to_screen(mvp, vertex, self.width as u32, self.height as u32) {
                Some(projected) => *corner = projected,
                None => return,
            }
        }

        let (v0, v1, v2) = (screen[0], screen[1], screen[2]);

        // Bounding box, clipped to the grid
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x as usize, y as usize, depth, ch, color);
                    }
                }
            }
        }
    }

    /// Rasterize one segment of the edge stream with an integer-stepped DDA.
    pub fn draw_segment(
        &mut self,
        mvp: &Matrix4<f32>,
        start: &Vector4<f32>,
        end: &Vector4<f32>,
        ch: char,
        color: Color,
    ) {
        let (width, height) = (self.width as u32, self.height as u32);
        let Some(a) = project_to_screen(mvp, start, width, height) else {
            return;
        };
        let Some(b) = project_to_screen(mvp, end, width, height) else {
            return;
        };

        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0);
        let count = steps as i32;
        for i in 0..=count {
            let t = i as f32 / steps;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            if x >= 0.0 && y >= 0.0 && (x as usize) < self.width && (y as usize) < self.height {
                self.plot(x as usize, y as usize, depth, ch, color);
            }
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, ch: char, color: Color) {
        let idx = y * self.width + x;
        if self.depth_test {
            if depth >= self.depth_buffer[idx] {
                return;
            }
            self.depth_buffer[idx] = depth;
        }
        self.cells[idx] = Cell { ch, color };
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.ch))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].ch
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    // With an identity MVP the inputs are already normalized device
    // coordinates, so tests can place geometry directly.
    fn full_screen_triangle(z: f32) -> [Vector4<f32>; 3] {
        [
            Vector4::new(-1.0, 1.0, z, 1.0),
            Vector4::new(1.0, 1.0, z, 1.0),
            Vector4::new(-1.0, -1.0, z, 1.0),
        ]
    }

    #[test]
    fn painter_order_without_depth_test() {
        let mut renderer = AsciiRenderer::new(4, 4, false);
        let mvp = Matrix4::identity();
        renderer.draw_triangle(&mvp, &full_screen_triangle(0.5), 'a', Color::White);
        renderer.draw_triangle(&mvp, &full_screen_triangle(-0.5), 'b', Color::White);
        // Last draw wins even though it is not nearer.
        renderer.draw_triangle(&mvp, &full_screen_triangle(0.9), 'c', Color::White);
        assert_eq!(renderer.char_at(0, 0), 'c');
    }

    #[test]
    fn depth_test_keeps_nearer_surface() {
        let mut renderer = AsciiRenderer::new(4, 4, true);
        let mvp = Matrix4::identity();
        renderer.draw_triangle(&mvp, &full_screen_triangle(-0.5), 'n', Color::White);
        renderer.draw_triangle(&mvp, &full_screen_triangle(0.5), 'f', Color::White);
        assert_eq!(renderer.char_at(0, 0), 'n');
    }

    #[test]
    fn segment_spans_its_row() {
        let mut renderer = AsciiRenderer::new(8, 8, false);
        let mvp = Matrix4::identity();
        let start = Vector4::new(-0.99, 0.0, 0.0, 1.0);
        let end = Vector4::new(0.99, 0.0, 0.0, 1.0);
        renderer.draw_segment(&mvp, &start, &end, '#', Color::White);
        for x in 1..7 {
            assert_eq!(renderer.char_at(x, 4), '#');
        }
    }

    #[test]
    fn clear_resets_cells_and_depth() {
        let mut renderer = AsciiRenderer::new(4, 4, true);
        let mvp = Matrix4::identity();
        renderer.draw_triangle(&mvp, &full_screen_triangle(0.0), 'x', Color::White);
        renderer.clear();
        assert_eq!(renderer.char_at(0, 0), ' ');
        renderer.draw_triangle(&mvp, &full_screen_triangle(0.9), 'y', Color::White);
        assert_eq!(renderer.char_at(0, 0), 'y');
    }
}
