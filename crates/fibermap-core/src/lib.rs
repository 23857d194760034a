//! Fibermap Core Library
//!
//! Route drawing and editing engine for the fibermap network inventory
//! console: the ordered coordinate path of a cable or cabinet connection,
//! the edit session that builds it from map gestures, and its conversion to
//! and from the stored record format.

pub mod config;
pub mod coord;
pub mod error;
pub mod geometry;
pub mod persistence;
pub mod record;
pub mod render;
pub mod route;
pub mod session;
pub mod shell;
pub mod storage;
pub mod surface;

pub use config::EditorConfig;
pub use coord::{Bounds, Coordinate};
pub use error::{RouteError, RouteResult};
pub use geometry::{bounds, midpoint, midpoints};
pub use persistence::{StorageEncoding, StoredRoute, from_storage_format, prepare_save, to_storage_format};
pub use record::{RecordKind, RouteRecord};
pub use render::{Handle, HandleKind, HandleShape, Projection, RouteStyle};
pub use route::Route;
pub use session::{EditSession, SessionState};
pub use shell::{Gesture, ShellKind};
pub use storage::{MemoryRouteStore, RouteStore, StoreError};
pub use surface::{FitRequest, MapView, RouteEditor, SurfaceEvent};
