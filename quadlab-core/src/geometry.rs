//! Vertex data for the shapes the client can draw.

use serde::{Deserialize, Serialize};

/// A 2D position, laid out as two consecutive `f32`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position2 {
    pub x: f32,
    pub y: f32,
}

impl Position2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

const TRIANGLE_VERTICES: [Position2; 3] = [
    Position2::new(-0.5, -0.5),
    Position2::new(0.0, 0.5),
    Position2::new(0.5, -0.5),
];

// Unique corners only, the index buffer stitches them into two triangles.
const QUAD_VERTICES: [Position2; 4] = [
    Position2::new(-0.5, -0.5),
    Position2::new(0.5, -0.5),
    Position2::new(0.5, 0.5),
    Position2::new(-0.5, 0.5),
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// The shape to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    /// Three vertices drawn directly, without an index buffer.
    Triangle,
    /// Four vertices drawn as two indexed triangles.
    #[default]
    Quad,
}

impl Geometry {
    pub fn vertices(self) -> &'static [Position2] {
        match self {
            Geometry::Triangle => &TRIANGLE_VERTICES,
            Geometry::Quad => &QUAD_VERTICES,
        }
    }

    /// Index data, empty for shapes drawn without an index buffer.
    pub fn indices(self) -> &'static [u32] {
        match self {
            Geometry::Triangle => &[],
            Geometry::Quad => &QUAD_INDICES,
        }
    }

    pub fn is_indexed(self) -> bool {
        !self.indices().is_empty()
    }

    /// The number of elements a draw call has to submit.
    pub fn draw_count(self) -> usize {
        if self.is_indexed() {
            self.indices().len()
        } else {
            self.vertices().len()
        }
    }
}
