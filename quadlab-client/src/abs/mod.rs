//! This module contains the thin wrappers over SDL2 and OpenGL: window and
//! context setup, GL error checking, shader compilation and mesh handling.

pub mod app;
pub mod debug;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
