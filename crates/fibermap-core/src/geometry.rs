//! Pure geometry helpers over routes.

use crate::coord::{Bounds, Coordinate};

/// Component-wise arithmetic mean of two coordinates.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}

/// Lazy iterator over `(midpoint, insert_after)` pairs of consecutive points.
///
/// Borrowing the points ties every iterator to the current route state, so a
/// fresh call after an edit always sees the edit.
#[derive(Debug, Clone)]
pub struct Midpoints<'a> {
    windows: std::iter::Enumerate<std::slice::Windows<'a, Coordinate>>,
}

impl Iterator for Midpoints<'_> {
    type Item = (Coordinate, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.windows
            .next()
            .map(|(index, pair)| (midpoint(pair[0], pair[1]), index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl ExactSizeIterator for Midpoints<'_> {}

/// Midpoints between consecutive points. Empty for fewer than 2 points.
pub fn midpoints(points: &[Coordinate]) -> Midpoints<'_> {
    Midpoints {
        windows: points.windows(2).enumerate(),
    }
}

/// Minimal bounds covering `points`, or `None` when there are none.
pub fn bounds(points: &[Coordinate]) -> Option<Bounds> {
    let (first, rest) = points.split_first()?;
    let mut result = Bounds::from_coordinate(*first);
    for point in rest {
        result.extend(*point);
    }
    Some(result)
}
