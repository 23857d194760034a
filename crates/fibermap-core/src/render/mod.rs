//! Render projection for route editing.
//!
//! Turns the working route into what the external map renderer draws:
//! - the polyline itself
//! - one draggable handle per point, indexed like the route
//! - one insertion marker between each pair of consecutive points
//!
//! The route stays pure data; this module only derives from it.

mod handles;
mod projector;
mod style;

pub use handles::{Handle, HandleKind, HandleShape};
pub use projector::{
    Projection, drawable_path, handles, hit_test_handle, insertion_markers, segments, to_path,
};
pub use style::{DEFAULT_ROUTE_COLOR, RouteStyle};
