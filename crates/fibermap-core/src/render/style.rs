//! Line styles for routes on the map.

use serde::{Deserialize, Serialize};

/// Default color of the drawing preview.
pub const DEFAULT_ROUTE_COLOR: &str = "#3B82F6";

/// How a route polyline is drawn by the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    /// CSS hex color.
    pub color: String,
    /// Line weight in pixels.
    pub weight: f64,
    /// Line opacity in `[0, 1]`.
    pub opacity: f64,
    /// Dash pattern (dash, gap) in pixels; `None` for a solid line.
    #[serde(default)]
    pub dash: Option<[f64; 2]>,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self::editing(DEFAULT_ROUTE_COLOR)
    }
}

impl RouteStyle {
    /// Preview line while a route is being edited.
    pub fn editing(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            weight: 4.0,
            opacity: 0.7,
            dash: None,
        }
    }

    /// Saved cable route.
    pub fn cable(color: impl Into<String>) -> Self {
        Self::editing(color)
    }

    /// Saved cabinet-to-cabinet connection, drawn dashed.
    pub fn cabinet_connection(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            weight: 3.0,
            opacity: 0.6,
            dash: Some([10.0, 10.0]),
        }
    }

    /// Check if the line is dashed.
    pub fn is_dashed(&self) -> bool {
        self.dash.is_some()
    }
}
