//! Geographic coordinates and bounding boxes.

use crate::error::{RouteError, RouteResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Stored records encode it as a `[lat, lng]` pair, which is also the serde
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting NaN and infinities.
    pub fn try_new(lat: f64, lng: f64) -> RouteResult<Self> {
        if lat.is_finite() && lng.is_finite() {
            Ok(Self { lat, lng })
        } else {
            Err(RouteError::NonFiniteCoordinate { lat, lng })
        }
    }

    /// Check that both components are finite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Planar point for renderers (`x = lng`, `y = lat`).
    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }

    /// Squared planar distance in degrees, only meaningful for hit testing.
    pub(crate) fn distance_sq(self, other: Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Self::new(point.y, point.x)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lng]
    }
}

/// Minimal latitude/longitude rectangle covering a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Degenerate bounds around a single coordinate.
    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self {
            min_lat: coord.lat,
            max_lat: coord.lat,
            min_lng: coord.lng,
            max_lng: coord.lng,
        }
    }

    /// Grow the bounds to include `coord`.
    pub fn extend(&mut self, coord: Coordinate) {
        self.min_lat = self.min_lat.min(coord.lat);
        self.max_lat = self.max_lat.max(coord.lat);
        self.min_lng = self.min_lng.min(coord.lng);
        self.max_lng = self.max_lng.max(coord.lng);
    }

    /// Smallest bounds covering both.
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check if a coordinate lies inside (edges included).
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lng >= self.min_lng
            && coord.lng <= self.max_lng
    }

    /// True when all points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.min_lat == self.max_lat && self.min_lng == self.max_lng
    }

    /// Planar rectangle (`x` is longitude, `y` is latitude).
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_lng, self.min_lat, self.max_lng, self.max_lat)
    }
}
