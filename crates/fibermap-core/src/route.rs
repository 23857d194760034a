//! Ordered point store for cable and connection routes.

use crate::coord::Coordinate;
use crate::error::{RouteError, RouteResult};
use serde::{Deserialize, Serialize};

/// An ordered sequence of coordinates describing a physical path.
///
/// Order is path order. Every edit returns a new `Route` and leaves `self`
/// untouched, so a rejected gesture can never leave a half-applied edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    /// Create an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a route from points in path order.
    pub fn from_points(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the route has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index.
    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    /// All points in path order.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Iterate over points in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Consume the route and return its points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// New route with `coord` at the end.
    pub fn append(&self, coord: Coordinate) -> Route {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        points.push(coord);
        Route { points }
    }

    /// New route without the point at `index`.
    pub fn remove(&self, index: usize) -> RouteResult<Route> {
        self.check_index(index)?;
        let points = self
            .points
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| *p)
            .collect();
        Ok(Route { points })
    }

    /// New route with the point at `index` set to `coord`.
    pub fn replace(&self, index: usize, coord: Coordinate) -> RouteResult<Route> {
        self.check_index(index)?;
        let mut points = self.points.clone();
        points[index] = coord;
        Ok(Route { points })
    }

    /// New route with `coord` inserted immediately after `index`.
    pub fn insert_after(&self, index: usize, coord: Coordinate) -> RouteResult<Route> {
        self.check_index(index)?;
        let mut points = self.points.clone();
        points.insert(index + 1, coord);
        Ok(Route { points })
    }

    /// New route without its last point (no-op when empty).
    pub fn truncate_last(&self) -> Route {
        let keep = self.points.len().saturating_sub(1);
        Route {
            points: self.points[..keep].to_vec(),
        }
    }

    fn check_index(&self, index: usize) -> RouteResult<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(RouteError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }
}

impl From<Vec<Coordinate>> for Route {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
