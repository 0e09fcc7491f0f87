use std::path::PathBuf;

use quadlab_core::Config;

use crate::abs::App;
use crate::render::QuadRenderer;

mod abs;
mod logging;
mod render;

fn main() {
    if let Err(e) = logging::init(logging::default_level()) {
        eprintln!("Failed to set up logging: {}", e);
    }

    // Optional single argument: the config file to use instead of the default one.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref());
    if let Some(level) = config.log_level_filter() {
        log::set_max_level(level);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), String> {
    let mut app = App::new(&config.window)?;
    let mut renderer = QuadRenderer::new(&app.gl, config)?;

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. }
                | sdl2::event::Event::KeyDown {
                    keycode: Some(sdl2::keyboard::Keycode::Escape),
                    ..
                } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(width, height),
                    ..
                } => renderer.resize(width, height),
                _ => {}
            }
        }

        renderer.frame();
        app.swap();
    }

    log::info!("Shutting down");
    Ok(())
}
