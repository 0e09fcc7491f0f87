//! The quad pipeline: load the annotated shader, split it into stages,
//! compile it, upload the geometry and draw it every frame.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use quadlab_core::{BASIC_SHADER, ColorPulse, Config, ShaderProgramSource, ShaderStage};

use crate::abs::{Mesh, ShaderProgram};
use crate::gl_check;

/// Name of the color uniform in the fragment stage.
pub const COLOR_UNIFORM: &str = "u_Color";

/// Loads the configured shader file, or the built-in one if none is set.
///
/// A file that cannot be read is logged and gives empty stages; the
/// program then fails to compile and nothing is drawn.
pub fn load_source(config: &Config) -> ShaderProgramSource {
    let source = match &config.shader_path {
        Some(path) => ShaderProgramSource::from_path(path).unwrap_or_else(|e| {
            log::error!("{}", e);
            ShaderProgramSource::default()
        }),
        None => ShaderProgramSource::parse(BASIC_SHADER),
    };

    for stage in ShaderStage::ALL {
        let text = source.source(stage);
        log::info!("{} shader loaded: {}", stage, !text.is_empty());
        log::debug!("{} source:\n{}", stage, text);
    }
    source
}

pub struct QuadRenderer {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: Option<ShaderProgram>,
    pulse: ColorPulse,
    animate: bool,
    clear_color: Vec4,
}

impl QuadRenderer {
    /// Builds the pipeline described by `config`. Shader failures are logged
    /// and leave the renderer without a program; only mesh creation errors
    /// are returned.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, String> {
        let source = load_source(config);
        let program = match ShaderProgram::from_source(gl, &source) {
            Ok(program) => Some(program),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };

        let geometry = config.geometry;
        let mesh = Mesh::new(gl, geometry.vertices(), geometry.indices(), glow::TRIANGLES)?;
        log::debug!(
            "Uploaded {:?}: {} vertices, indexed: {}",
            geometry,
            geometry.vertices().len(),
            mesh.is_indexed()
        );

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            pulse: config.animation.pulse(),
            animate: config.animation.enabled,
            clear_color: Vec4::from(config.clear_color),
        })
    }

    /// Updates the viewport after a window resize.
    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            gl_check!(self.gl, self.gl.viewport(0, 0, width, height));
        }
    }

    /// Clears the screen and draws one frame.
    pub fn frame(&mut self) {
        let c = self.clear_color;
        unsafe {
            gl_check!(self.gl, self.gl.clear_color(c.x, c.y, c.z, c.w));
            gl_check!(self.gl, self.gl.clear(glow::COLOR_BUFFER_BIT));
        }

        let Some(program) = &self.program else {
            return;
        };
        program.use_program();
        program.set_uniform(COLOR_UNIFORM, self.pulse.color());
        self.mesh.draw();

        if self.animate {
            self.pulse.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_shader_file_gives_empty_stages() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            shader_path: Some(dir.path().join("missing.shader")),
            ..Config::default()
        };
        assert_eq!(load_source(&config), ShaderProgramSource::default());
    }

    #[test]
    fn test_builtin_shader_without_path() {
        let config = Config::default();
        let source = load_source(&config);
        assert!(source.is_complete());
        assert!(source.fragment().contains(COLOR_UNIFORM));
    }

    #[test]
    fn test_configured_shader_file_is_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Flat.shader");
        std::fs::write(&path, "#shader vertex\nV\n#shader fragment\nF\n").unwrap();
        let config = Config {
            shader_path: Some(path),
            ..Config::default()
        };
        let source = load_source(&config);
        assert_eq!(source.vertex(), "V\n");
        assert_eq!(source.fragment(), "F\n");
    }
}
