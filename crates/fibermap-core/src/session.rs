//! Edit session state machine for route drawing.

use crate::coord::Coordinate;
use crate::error::{RouteError, RouteResult};
use crate::route::Route;
use uuid::Uuid;

/// Identifier used to correlate log lines of one edit.
pub type SessionId = Uuid;

/// State of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No edit in progress.
    #[default]
    Idle,
    /// An edit is in progress.
    Active {
        /// Whether a plain map click appends a point.
        drawing: bool,
    },
}

/// Owns the working route of one edit and gates mutations on the state.
///
/// Drag, delete and insert are valid whenever the session is active; the
/// `drawing` flag only controls click-to-append.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    /// Current state.
    state: SessionState,
    /// Working copy of the route.
    route: Route,
    /// Id of the current (or last) activation.
    id: Option<SessionId>,
}

impl EditSession {
    /// Create an idle session with an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an edit in drawing mode, seeded from `initial` when given.
    pub fn start(&mut self, initial: Option<Route>) {
        self.start_with_mode(initial, true);
    }

    /// Begin an edit with an explicit drawing flag.
    pub fn start_with_mode(&mut self, initial: Option<Route>, drawing: bool) {
        let id = Uuid::new_v4();
        self.route = initial.unwrap_or_default();
        self.state = SessionState::Active { drawing };
        self.id = Some(id);
        log::debug!(
            "Route session {} started with {} points (drawing: {})",
            id,
            self.route.len(),
            drawing
        );
    }

    /// Flip the drawing flag. Returns false when idle.
    pub fn toggle_drawing(&mut self) -> bool {
        match &mut self.state {
            SessionState::Active { drawing } => {
                *drawing = !*drawing;
                log::debug!("Route session drawing mode: {}", drawing);
                true
            }
            SessionState::Idle => false,
        }
    }

    /// Set the drawing flag. Returns false when idle.
    pub fn set_drawing(&mut self, value: bool) -> bool {
        match &mut self.state {
            SessionState::Active { drawing } => {
                *drawing = value;
                true
            }
            SessionState::Idle => false,
        }
    }

    /// Leave the active state. Nothing is persisted; the route stays readable.
    pub fn stop(&mut self) {
        if let Some(id) = self.id {
            log::debug!("Route session {} stopped with {} points", id, self.route.len());
        }
        self.state = SessionState::Idle;
    }

    /// Empty the working route without changing state.
    pub fn clear(&mut self) {
        self.route = Route::new();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if an edit is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// Check if clicks currently append points.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Active { drawing: true })
    }

    pub fn id(&self) -> Option<SessionId> {
        self.id
    }

    /// The working route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Take the working route, leaving an empty one behind.
    pub fn take_route(&mut self) -> Route {
        std::mem::take(&mut self.route)
    }

    /// Append a point regardless of the drawing flag.
    pub fn append(&mut self, coord: Coordinate) -> RouteResult<()> {
        self.ensure_active()?;
        self.route = self.route.append(coord);
        Ok(())
    }

    /// Move the point at `index` to `coord`.
    pub fn move_point(&mut self, index: usize, coord: Coordinate) -> RouteResult<()> {
        self.ensure_active()?;
        self.route = self.route.replace(index, coord)?;
        Ok(())
    }

    /// Remove the point at `index`.
    pub fn remove_point(&mut self, index: usize) -> RouteResult<()> {
        self.ensure_active()?;
        self.route = self.route.remove(index)?;
        Ok(())
    }

    /// Insert `coord` right after `index`.
    pub fn insert_after(&mut self, index: usize, coord: Coordinate) -> RouteResult<()> {
        self.ensure_active()?;
        self.route = self.route.insert_after(index, coord)?;
        Ok(())
    }

    /// Drop the last point. Returns whether a point was removed.
    pub fn undo_last_point(&mut self) -> RouteResult<bool> {
        self.ensure_active()?;
        if self.route.is_empty() {
            return Ok(false);
        }
        self.route = self.route.truncate_last();
        Ok(true)
    }

    fn ensure_active(&self) -> RouteResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(RouteError::NoActiveSession)
        }
    }
}
