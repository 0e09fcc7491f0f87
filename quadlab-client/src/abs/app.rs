//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;
use quadlab_core::WindowConfig;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window described by `config` with a current OpenGL 3.3
    /// core context. The width and height are ignored if `fullscreen` is set.
    pub fn new(config: &WindowConfig) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video_subsystem = sdl.video()?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let (width, height) = if config.fullscreen {
            let display_mode = video_subsystem.current_display_mode(0)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (config.width, config.height)
        };

        let mut window = video_subsystem
            .window(&config.title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        if config.fullscreen {
            window.set_fullscreen(sdl2::video::FullscreenType::Desktop)?;
        }

        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;

        let interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {}", e);
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        log::info!("OpenGL {}", unsafe { gl.get_parameter_string(glow::VERSION) });

        let event_pump = sdl.event_pump()?;
        let gl = Arc::new(gl);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
