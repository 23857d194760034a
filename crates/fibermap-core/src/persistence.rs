//! Conversion between routes and the stored `coordenadas` field.
//!
//! Cable and cabinet-connection records keep their route either as a native
//! JSON array of `[lat, lng]` pairs or as that array encoded into a string.
//! Both shapes are read back; the writer picks one via [`StorageEncoding`].

use crate::coord::Coordinate;
use crate::error::{RouteError, RouteResult};
use crate::route::Route;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which shape a saved route takes in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageEncoding {
    /// Native array `[[lat, lng], ...]`.
    #[default]
    Array,
    /// The same array serialized into a JSON string.
    JsonString,
}

/// A route as written to a domain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRoute {
    Array(Vec<[f64; 2]>),
    JsonString(String),
}

impl StoredRoute {
    /// Convert to a JSON value for the record's `coordenadas` field.
    pub fn to_value(&self) -> Value {
        match self {
            StoredRoute::Array(points) => points
                .iter()
                .map(|[lat, lng]| Value::from(vec![*lat, *lng]))
                .collect(),
            StoredRoute::JsonString(s) => Value::String(s.clone()),
        }
    }
}

/// Encode a route for storage.
///
/// Returns `None` for fewer than 2 points: the record then has no custom
/// route and is drawn as a straight line between its endpoints.
pub fn to_storage_format(route: &Route, encoding: StorageEncoding) -> Option<StoredRoute> {
    if route.len() < 2 {
        return None;
    }
    let pairs: Vec<[f64; 2]> = route.iter().map(|c| (*c).into()).collect();
    match encoding {
        StorageEncoding::Array => Some(StoredRoute::Array(pairs)),
        StorageEncoding::JsonString => {
            // Serializing finite f64 pairs cannot fail
            let json = serde_json::to_string(&pairs).unwrap_or_else(|_| "[]".to_string());
            Some(StoredRoute::JsonString(json))
        }
    }
}

/// Save-time gate: a single point is not a path and is refused.
pub fn prepare_save(route: &Route, encoding: StorageEncoding) -> RouteResult<Option<StoredRoute>> {
    if route.len() == 1 {
        return Err(RouteError::InsufficientPoints { count: 1 });
    }
    Ok(to_storage_format(route, encoding))
}

/// Read a stored route, substituting an empty route for malformed input.
pub fn from_storage_format(stored: Option<&Value>) -> Route {
    match try_from_storage_format(stored) {
        Ok(route) => route,
        Err(e) => {
            log::warn!("{}; using empty route", e);
            Route::new()
        }
    }
}

/// Read a stored route, reporting malformed input.
///
/// Accepts an absent value, `null`, a native array, or a JSON-encoded string
/// of the array. Array items may be `[lat, lng]` pairs or `{lat, lng}`
/// objects.
pub fn try_from_storage_format(stored: Option<&Value>) -> RouteResult<Route> {
    match stored {
        None | Some(Value::Null) => Ok(Route::new()),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                return Ok(Route::new());
            }
            let value: Value = serde_json::from_str(s)
                .map_err(|e| RouteError::MalformedStoredRoute(format!("invalid JSON: {}", e)))?;
            match value {
                Value::String(_) => Err(RouteError::MalformedStoredRoute(
                    "doubly encoded string".to_string(),
                )),
                other => try_from_storage_format(Some(&other)),
            }
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_coordinate(item).ok_or_else(|| {
                RouteError::MalformedStoredRoute(format!("item {} is not a coordinate", i))
            }))
            .collect::<RouteResult<Vec<_>>>()
            .map(Route::from_points),
        Some(other) => Err(RouteError::MalformedStoredRoute(format!(
            "expected array, got {}",
            value_kind(other)
        ))),
    }
}

/// Read a typed stored route.
pub fn from_stored(stored: &StoredRoute) -> Route {
    from_storage_format(Some(&stored.to_value()))
}

fn parse_coordinate(item: &Value) -> Option<Coordinate> {
    let (lat, lng) = match item {
        Value::Array(pair) if pair.len() == 2 => (pair[0].as_f64()?, pair[1].as_f64()?),
        Value::Object(map) => (map.get("lat")?.as_f64()?, map.get("lng")?.as_f64()?),
        _ => return None,
    };
    Coordinate::try_new(lat, lng).ok()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
