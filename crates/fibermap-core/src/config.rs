//! Editor configuration.

use crate::coord::Coordinate;
use crate::persistence::StorageEncoding;
use crate::render::DEFAULT_ROUTE_COLOR;
use serde::{Deserialize, Serialize};

/// Settings shared by every route editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Map center when there is nothing to fit (Brasília).
    pub default_center: Coordinate,
    /// Map zoom when there is nothing to fit.
    pub default_zoom: u8,
    /// Padding in pixels when fitting the map to the route.
    pub fit_padding: f64,
    /// Handle hit radius in degrees.
    pub hit_tolerance: f64,
    /// Shape of saved routes.
    pub storage_encoding: StorageEncoding,
    /// Preview line color.
    pub route_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(-15.7801, -47.9292),
            default_zoom: 13,
            fit_padding: 50.0,
            hit_tolerance: 0.0002,
            storage_encoding: StorageEncoding::Array,
            route_color: DEFAULT_ROUTE_COLOR.to_string(),
        }
    }
}

impl EditorConfig {
    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
