//! Derives drawable geometry from a route.

use super::handles::{Handle, HandleKind, HandleShape};
use super::style::RouteStyle;
use crate::coord::{Bounds, Coordinate};
use crate::geometry;
use crate::route::Route;
use kurbo::BezPath;

/// The route points as-is, in path order.
pub fn drawable_path(route: &Route) -> &[Coordinate] {
    route.points()
}

/// Line segments between consecutive points. None for fewer than 2 points.
pub fn segments(route: &Route) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
    route.points().windows(2).map(|pair| (pair[0], pair[1]))
}

/// One draggable handle per route point, indexed like the route.
pub fn handles(route: &Route) -> Vec<Handle> {
    route
        .iter()
        .enumerate()
        .map(|(index, point)| {
            Handle::new(HandleKind::Vertex(index), *point).with_shape(HandleShape::Circle)
        })
        .collect()
}

/// One insertion marker per consecutive pair.
pub fn insertion_markers(route: &Route) -> Vec<Handle> {
    geometry::midpoints(route.points())
        .map(|(position, insert_after)| {
            Handle::new(HandleKind::Midpoint { insert_after }, position)
                .with_shape(HandleShape::Ghost)
        })
        .collect()
}

/// Planar path (`x = lng`, `y = lat`) for renderers that draw with kurbo.
///
/// Empty for fewer than 2 points, so nothing is stroked.
pub fn to_path(route: &Route) -> BezPath {
    let mut path = BezPath::new();
    let points = route.points();
    if points.len() < 2 {
        return path;
    }

    path.move_to(points[0].to_point());
    for p in &points[1..] {
        path.line_to(p.to_point());
    }
    path
}

/// Everything the map renderer needs to repaint one route.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    /// Polyline points; only stroked when there are at least two.
    pub path: Vec<Coordinate>,
    /// Vertex handles, indexed like the route.
    pub handles: Vec<Handle>,
    /// Midpoint markers.
    pub insertion_markers: Vec<Handle>,
    /// Planar path for kurbo-based renderers.
    pub bez_path: BezPath,
    /// Line style.
    pub style: RouteStyle,
    /// Bounds of the route, if it has points.
    pub bounds: Option<Bounds>,
}

impl Projection {
    /// Derive the projection from the current route.
    pub fn compute(route: &Route, style: &RouteStyle) -> Self {
        Self {
            path: drawable_path(route).to_vec(),
            handles: handles(route),
            insertion_markers: insertion_markers(route),
            bez_path: to_path(route),
            style: style.clone(),
            bounds: geometry::bounds(route.points()),
        }
    }

    /// Check if the renderer should stroke a line.
    pub fn has_line(&self) -> bool {
        self.path.len() >= 2
    }

    /// Find the handle under `position`.
    ///
    /// Vertex handles win over midpoint markers; within a kind the last drawn
    /// (topmost) handle wins.
    pub fn hit_test_handle(&self, position: Coordinate, tolerance: f64) -> Option<HandleKind> {
        hit_test_handle(self, position, tolerance)
    }
}

/// Hit test the handles of a projection. `tolerance` is in degrees.
pub fn hit_test_handle(
    projection: &Projection,
    position: Coordinate,
    tolerance: f64,
) -> Option<HandleKind> {
    let tolerance_sq = tolerance * tolerance;
    let hit = |handles: &[Handle]| {
        handles
            .iter()
            .rev()
            .find(|h| h.position.distance_sq(position) <= tolerance_sq)
            .map(|h| h.kind)
    };
    hit(&projection.handles).or_else(|| hit(&projection.insertion_markers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_single_point_has_no_line() {
        let route = Route::from_points(vec![c(1.0, 1.0)]);
        assert_eq!(segments(&route).count(), 0);
        assert!(to_path(&route).elements().is_empty());

        let projection = Projection::compute(&route, &RouteStyle::default());
        assert!(!projection.has_line());
        assert_eq!(projection.handles.len(), 1);
        assert!(projection.insertion_markers.is_empty());
    }

    #[test]
    fn test_handles_match_indices() {
        let route = Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 0.0)]);
        let handles = handles(&route);
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.vertex_index(), Some(i));
            assert_eq!(Some(handle.position), route.get(i));
        }
    }

    #[test]
    fn test_insertion_markers() {
        let route = Route::from_points(vec![c(0.0, 0.0), c(2.0, 2.0), c(2.0, 4.0)]);
        let markers = insertion_markers(&route);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, HandleKind::Midpoint { insert_after: 0 });
        assert_eq!(markers[0].position, c(1.0, 1.0));
        assert_eq!(markers[1].kind, HandleKind::Midpoint { insert_after: 1 });
        assert_eq!(markers[1].shape, HandleShape::Ghost);
    }

    #[test]
    fn test_bez_path_bounds() {
        let route = Route::from_points(vec![c(10.0, 20.0), c(50.0, 80.0)]);
        let bbox = to_path(&route).bounding_box();
        assert!((bbox.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bbox.y0 - 10.0).abs() < f64::EPSILON);
        assert!((bbox.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bbox.y1 - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_prefers_vertices() {
        let route = Route::from_points(vec![c(0.0, 0.0), c(0.0, 0.002)]);
        let projection = Projection::compute(&route, &RouteStyle::default());

        assert_eq!(
            projection.hit_test_handle(c(0.0, 0.0001), 0.0005),
            Some(HandleKind::Vertex(0))
        );
        assert_eq!(
            projection.hit_test_handle(c(0.0, 0.001), 0.0005),
            Some(HandleKind::Midpoint { insert_after: 0 })
        );
        assert_eq!(projection.hit_test_handle(c(1.0, 1.0), 0.0005), None);
    }
}
