/// spin3d Terminal Demo - Rotating Cube
///
/// Renders the rotating cube with the ASCII rasterizer. Two variants:
///   spin3d-terminal            blended faces with an edge overlay
///   spin3d-terminal shaded     depth-tested Blinn-Phong faces
///
/// Press Q or ESC to quit.
use nalgebra::Vector4;
use spin3d_core::render::BLENDED_FACE_COLOR;
use spin3d_core::{Cube, RenderConfig, RenderMode};
use spin3d_terminal::{AppError, TerminalApp};

fn main() -> Result<(), AppError> {
    env_logger::init();

    let mode = match std::env::args().nth(1) {
        Some(name) => match RenderMode::parse(&name) {
            Some(mode) => mode,
            None => {
                eprintln!("unknown mode '{}', expected 'blended' or 'shaded'", name);
                std::process::exit(2);
            }
        },
        None => RenderMode::Blended,
    };
    log::info!("starting rotating cube, mode: {:?}", mode);

    let mut cube = Cube::new(1.0);
    cube.color_faces = Vector4::from(BLENDED_FACE_COLOR);
    // The browser demo inks black edges on a white page; on a dark terminal
    // the edges go white instead.
    cube.color_edges = Vector4::new(1.0, 1.0, 1.0, 1.0);

    let mut app = TerminalApp::new(cube, RenderConfig::for_mode(mode))?;
    app.run()?;

    log::info!("done");
    Ok(())
}
