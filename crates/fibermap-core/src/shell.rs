//! Presentation shells that drive the route editor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gesture the editor can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Append,
    DragMove,
    Delete,
    InsertMidpoint,
    SnapToEntity,
    Undo,
    Clear,
}

impl Gesture {
    pub fn name(self) -> &'static str {
        match self {
            Gesture::Append => "append",
            Gesture::DragMove => "drag-move",
            Gesture::Delete => "delete",
            Gesture::InsertMidpoint => "insert-midpoint",
            Gesture::SnapToEntity => "snap-to-entity",
            Gesture::Undo => "undo",
            Gesture::Clear => "clear",
        }
    }
}

/// The presentation around the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellKind {
    /// Full-screen modal with drag, insert and delete.
    #[default]
    Modal,
    /// Inline overlay on the network map; network markers can be clicked
    /// to add their exact location.
    Overlay,
    /// Click-to-append drawer with undo and clear only.
    Simple,
}

impl ShellKind {
    /// Check if this shell exposes a gesture.
    pub fn supports(self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::Append | Gesture::Undo | Gesture::Clear => true,
            Gesture::DragMove | Gesture::Delete | Gesture::InsertMidpoint => {
                self != ShellKind::Simple
            }
            Gesture::SnapToEntity => self == ShellKind::Overlay,
        }
    }

    /// Initial drawing flag when opening `point_count` existing points.
    ///
    /// The modal opens an existing route for dragging rather than appending.
    pub fn starts_drawing(self, point_count: usize) -> bool {
        match self {
            ShellKind::Modal => point_count == 0,
            ShellKind::Overlay | ShellKind::Simple => true,
        }
    }

    /// Check if insertion markers should be shown.
    pub fn shows_insertion_markers(self) -> bool {
        self.supports(Gesture::InsertMidpoint)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShellKind::Modal => "modal",
            ShellKind::Overlay => "overlay",
            ShellKind::Simple => "simple",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
