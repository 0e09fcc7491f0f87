//! The windowless core of quadlab. This crate holds everything the client
//! needs that does not touch an OpenGL context: splitting annotated shader
//! files into their stages, the geometry tables, the color animation and
//! the configuration.

pub mod animation;
pub mod config;
pub mod geometry;
pub mod shader_source;

pub use animation::*;
pub use config::*;
pub use geometry::*;
pub use shader_source::*;

/// The built-in annotated shader, used when no shader path is configured.
pub const BASIC_SHADER: &str = include_str!("../../res/shaders/Basic.shader");
