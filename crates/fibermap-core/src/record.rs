//! Domain records that own a route.

use crate::coord::Coordinate;
use crate::persistence::{self, StoredRoute};
use crate::render::{DEFAULT_ROUTE_COLOR, RouteStyle};
use crate::route::Route;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which kind of network link a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Cable between two POPs.
    Cable,
    /// Link between two cabinets (CTOs).
    CabinetConnection,
}

/// A cable or cabinet connection as read from storage.
///
/// Only the fields the route editor needs; the rest of the record belongs to
/// the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: String,
    pub kind: RecordKind,
    #[serde(default)]
    pub name: String,
    /// Line color as a CSS hex string.
    #[serde(default = "default_color")]
    pub color: String,
    /// Stored route, either a native array or a JSON string.
    #[serde(default)]
    pub coordenadas: Option<Value>,
    /// Location of the origin POP/CTO, if referenced.
    #[serde(default)]
    pub origin: Option<Coordinate>,
    /// Location of the destination POP/CTO, if referenced.
    #[serde(default)]
    pub destination: Option<Coordinate>,
}

fn default_color() -> String {
    DEFAULT_ROUTE_COLOR.to_string()
}

impl RouteRecord {
    /// Create a record without a stored route or endpoints.
    pub fn new(id: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: String::new(),
            color: default_color(),
            coordenadas: None,
            origin: None,
            destination: None,
        }
    }

    /// Set both endpoints.
    pub fn with_endpoints(mut self, origin: Coordinate, destination: Coordinate) -> Self {
        self.origin = Some(origin);
        self.destination = Some(destination);
        self
    }

    /// The stored custom route, empty when absent or unreadable.
    pub fn stored_route(&self) -> Route {
        persistence::from_storage_format(self.coordenadas.as_ref())
    }

    /// Replace the stored route; `None` removes the custom route.
    pub fn set_route(&mut self, stored: Option<StoredRoute>) {
        self.coordenadas = stored.map(|s| s.to_value());
    }

    /// Path to draw on the network map.
    ///
    /// The custom route when there is one, otherwise a straight line between
    /// the endpoints when both are known, otherwise nothing.
    pub fn display_path(&self) -> Route {
        let stored = self.stored_route();
        if !stored.is_empty() {
            return stored;
        }
        match (self.origin, self.destination) {
            (Some(a), Some(b)) => Route::from_points(vec![a, b]),
            _ => Route::new(),
        }
    }

    /// Line style for this record on the network map.
    pub fn style(&self) -> RouteStyle {
        match self.kind {
            RecordKind::Cable => RouteStyle::cable(self.color.clone()),
            RecordKind::CabinetConnection => RouteStyle::cabinet_connection(self.color.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_display_path_prefers_custom_route() {
        let mut record = RouteRecord::new("cabo-1", RecordKind::Cable)
            .with_endpoints(c(0.0, 0.0), c(5.0, 5.0));
        record.coordenadas = Some(json!([[0, 0], [1, 2], [5, 5]]));
        assert_eq!(record.display_path().len(), 3);
    }

    #[test]
    fn test_display_path_falls_back_to_endpoints() {
        let record = RouteRecord::new("cabo-1", RecordKind::Cable)
            .with_endpoints(c(0.0, 0.0), c(5.0, 5.0));
        assert_eq!(record.display_path().points(), &[c(0.0, 0.0), c(5.0, 5.0)]);

        let mut broken = record.clone();
        broken.coordenadas = Some(json!("{not json"));
        assert_eq!(broken.display_path().len(), 2);
    }

    #[test]
    fn test_display_path_empty_without_endpoints() {
        let mut record = RouteRecord::new("conexao-1", RecordKind::CabinetConnection);
        record.origin = Some(c(1.0, 1.0));
        assert!(record.display_path().is_empty());
    }

    #[test]
    fn test_set_route_none_clears() {
        let mut record = RouteRecord::new("cabo-1", RecordKind::Cable);
        record.set_route(Some(StoredRoute::Array(vec![[1.0, 1.0], [2.0, 2.0]])));
        assert_eq!(record.stored_route().len(), 2);
        record.set_route(None);
        assert!(record.coordenadas.is_none());
    }

    #[test]
    fn test_style_by_kind() {
        let record = RouteRecord::new("conexao-1", RecordKind::CabinetConnection);
        assert!(record.style().is_dashed());
    }

    #[test]
    fn test_deserialize_record() {
        let record: RouteRecord = serde_json::from_value(json!({
            "id": "abc",
            "kind": "cabinet_connection",
            "coordenadas": "[[1,1],[2,2]]",
            "origin": [1.0, 1.0]
        }))
        .unwrap();
        assert_eq!(record.color, "#3B82F6");
        assert_eq!(record.stored_route().len(), 2);
    }
}
