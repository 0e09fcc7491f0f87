//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use quadlab_core::{ShaderProgramSource, ShaderStage};

use crate::gl_check;

/// The GL shader type constant for a stage.
pub fn gl_shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Represents an individual compiled OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader of the given stage. On failure the shader object
    /// is deleted and the driver's info log is returned.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl_check!(gl, gl.create_shader(gl_shader_type(stage)))
                .map_err(|e| e.to_string())?;
            gl_check!(gl, gl.shader_source(shader, source));
            gl_check!(gl, gl.compile_shader(shader));

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(format!("Failed to compile {} shader: {}", stage, log.trim_end()));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(program, name) {
                gl_check!(gl, gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w));
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl_check!(gl, gl.create_program()).map_err(|e| e.to_string())?;

            for shader in shaders {
                gl_check!(gl, gl.attach_shader(program, shader.id));
            }

            gl_check!(gl, gl.link_program(program));

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(format!("Failed to link shader program: {}", log.trim_end()));
            }

            for shader in shaders {
                gl_check!(gl, gl.detach_shader(program, shader.id));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles every stage of `source` and links them. Every stage is
    /// compiled even if an earlier one fails, so all diagnostics are
    /// reported together. The stage shaders are deleted once linked.
    pub fn from_source(gl: &Arc<glow::Context>, source: &ShaderProgramSource) -> Result<Self, String> {
        let mut shaders = Vec::with_capacity(ShaderStage::ALL.len());
        let mut errors = Vec::new();
        for stage in ShaderStage::ALL {
            match Shader::new(gl, stage, source.source(stage)) {
                Ok(shader) => shaders.push(shader),
                Err(e) => errors.push(e),
            }
        }
        if !errors.is_empty() {
            return Err(errors.join("\n"));
        }

        let refs: Vec<&Shader> = shaders.iter().collect();
        Self::new(gl, &refs)
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            gl_check!(self.gl, self.gl.use_program(Some(self.id)));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_shader_types() {
        assert_eq!(gl_shader_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(gl_shader_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }
}
