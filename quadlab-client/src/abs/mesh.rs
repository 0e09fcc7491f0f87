//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;
use quadlab_core::Position2;

use crate::gl_check;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

impl Vertex for Position2 {
    fn vertex_attribs(gl: &glow::Context) {
        let stride = std::mem::size_of::<Position2>() as i32;
        unsafe {
            gl_check!(gl, gl.enable_vertex_attrib_array(0));
            gl_check!(gl, gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0));
        }
    }
}

/// Represents a mesh stored on the GPU side. A mesh created without indices
/// has no element buffer and is drawn with `glDrawArrays`.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    vertex_count: usize,
    index_count: usize,
}

fn as_bytes<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

impl Mesh {
    /// Creates a new mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl_check!(gl, gl.create_vertex_array())?;
            let vbo = match gl_check!(gl, gl.create_buffer()) {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e);
                }
            };

            // From here on `Drop` owns the GL objects, including on early return.
            let mut mesh = Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo: None,
                vertex_count: vertices.len(),
                index_count: indices.len(),
            };

            gl_check!(gl, gl.bind_vertex_array(Some(vao)));
            gl_check!(gl, gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo)));
            gl_check!(
                gl,
                gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW)
            );

            V::vertex_attribs(gl);

            if !indices.is_empty() {
                let ebo = match gl_check!(gl, gl.create_buffer()) {
                    Ok(ebo) => ebo,
                    Err(e) => {
                        gl.bind_vertex_array(None);
                        gl.bind_buffer(glow::ARRAY_BUFFER, None);
                        return Err(e);
                    }
                };
                mesh.ebo = Some(ebo);
                gl_check!(gl, gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo)));
                gl_check!(
                    gl,
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        as_bytes(indices),
                        glow::STATIC_DRAW,
                    )
                );
            }

            // The element buffer binding is part of the VAO, so unbind the VAO first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(mesh)
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            gl_check!(self.gl, self.gl.bind_vertex_array(Some(self.vao)));
            if self.ebo.is_some() {
                gl_check!(
                    self.gl,
                    self.gl.draw_elements(
                        self.draw_mode,
                        self.index_count as i32,
                        glow::UNSIGNED_INT,
                        0
                    )
                );
            } else {
                gl_check!(
                    self.gl,
                    self.gl.draw_arrays(self.draw_mode, 0, self.vertex_count as i32)
                );
            }
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
