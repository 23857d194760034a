//! Handle definitions for route manipulation.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};

/// A clickable or draggable marker on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position on the map.
    pub position: Coordinate,
    /// Visual shape of the handle.
    pub shape: HandleShape,
}

/// The kind of handle - determines which gesture it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// A real route point; draggable and deletable. Index matches the route.
    Vertex(usize),
    /// Derived point between `insert_after` and `insert_after + 1`.
    Midpoint { insert_after: usize },
}

/// Visual shape of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleShape {
    /// Filled circle (route points).
    #[default]
    Circle,
    /// Smaller translucent circle (insertion markers).
    Ghost,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Coordinate) -> Self {
        Self {
            kind,
            position,
            shape: HandleShape::default(),
        }
    }

    /// Set the handle shape.
    pub fn with_shape(mut self, shape: HandleShape) -> Self {
        self.shape = shape;
        self
    }

    /// Route index of a vertex handle.
    pub fn vertex_index(&self) -> Option<usize> {
        match self.kind {
            HandleKind::Vertex(index) => Some(index),
            HandleKind::Midpoint { .. } => None,
        }
    }
}
