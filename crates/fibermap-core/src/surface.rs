//! Interaction surface: map gestures in, route edits and projections out.

use crate::config::EditorConfig;
use crate::coord::{Bounds, Coordinate};
use crate::error::{RouteError, RouteResult};
use crate::persistence::{self, StoredRoute};
use crate::render::{HandleKind, Projection, RouteStyle};
use crate::route::Route;
use crate::session::EditSession;
use crate::shell::{Gesture, ShellKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Continuation receiving the saved route (`None` means "no custom route").
pub type RouteCompleteFn = Box<dyn FnMut(Option<StoredRoute>)>;

/// A gesture or command from the presentation shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Plain click on the map.
    PrimaryClick { at: Coordinate },
    /// A vertex handle moved (fires on every pointer move while dragging).
    HandleDragMove { index: usize, to: Coordinate },
    /// Right-click or long-press on a vertex handle.
    HandleSecondaryAction { index: usize },
    /// Click on an insertion marker.
    MidpointActivate { insert_after: usize, at: Coordinate },
    /// Click on a POP or CTO marker of the network map.
    EntityMarkerClick { at: Coordinate },
    ToggleDrawing,
    Undo,
    Clear,
    Save,
    Cancel,
}

/// Request to fit the map view to the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    pub bounds: Bounds,
    /// Padding in pixels.
    pub padding: f64,
}

/// Initial map view for a shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Route editor bound to one presentation shell.
///
/// Owns the single edit session of its map surface. Every successful edit
/// recomputes the projection before the handler returns; a rejected edit
/// leaves both the route and the projection as they were.
pub struct RouteEditor {
    /// Edit session holding the working route.
    session: EditSession,
    /// Which gestures the shell exposes.
    shell: ShellKind,
    /// Shared settings.
    config: EditorConfig,
    /// Preview line style.
    style: RouteStyle,
    /// Derived geometry for the renderer.
    projection: Projection,
    /// Receives the route on save.
    on_route_complete: RouteCompleteFn,
    /// Point count at the last fit request.
    fitted_len: usize,
    /// Fit request not yet taken by the renderer.
    pending_fit: Option<FitRequest>,
}

impl fmt::Debug for RouteEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEditor")
            .field("session", &self.session)
            .field("shell", &self.shell)
            .field("pending_fit", &self.pending_fit)
            .finish_non_exhaustive()
    }
}

impl RouteEditor {
    /// Create an idle editor that hands saved routes to `on_route_complete`.
    pub fn new(
        shell: ShellKind,
        config: EditorConfig,
        on_route_complete: impl FnMut(Option<StoredRoute>) + 'static,
    ) -> Self {
        let style = RouteStyle::editing(config.route_color.clone());
        Self {
            session: EditSession::new(),
            shell,
            config,
            style,
            projection: Projection::default(),
            on_route_complete: Box::new(on_route_complete),
            fitted_len: 0,
            pending_fit: None,
        }
    }

    /// Open an edit, seeded from `initial` when the record already has a route.
    pub fn open(&mut self, initial: Option<Route>) {
        let len = initial.as_ref().map_or(0, Route::len);
        let drawing = self.shell.starts_drawing(len);
        self.session.start_with_mode(initial, drawing);
        self.fitted_len = 0;
        self.pending_fit = None;
        self.refresh();
    }

    /// Open an edit from a record's stored route value.
    pub fn open_stored(&mut self, stored: Option<&Value>) {
        let route = persistence::from_storage_format(stored);
        self.open(if route.is_empty() { None } else { Some(route) });
    }

    /// Plain map click: appends when drawing, otherwise ignored.
    ///
    /// Returns whether the route changed.
    pub fn on_primary_click(&mut self, coord: Coordinate) -> RouteResult<bool> {
        self.append_if_drawing(Gesture::Append, coord)
    }

    /// Move the point at `index` to `coord`.
    ///
    /// Each call replaces the coordinate outright, so repeated calls with the
    /// same arguments leave the same route.
    pub fn on_handle_drag_move(&mut self, index: usize, coord: Coordinate) -> RouteResult<()> {
        let coord = self.check(Gesture::DragMove, coord)?;
        if self.session.route().get(index) == Some(coord) {
            return Ok(());
        }
        let result = self.session.move_point(index, coord);
        self.finish(Gesture::DragMove, result)
    }

    /// Delete the point at `index`.
    pub fn on_handle_secondary_action(&mut self, index: usize) -> RouteResult<()> {
        self.check_gesture(Gesture::Delete)?;
        let result = self.session.remove_point(index);
        self.finish(Gesture::Delete, result)
    }

    /// Insert `coord` right after `insert_after`.
    pub fn on_midpoint_activate(&mut self, insert_after: usize, coord: Coordinate) -> RouteResult<()> {
        let coord = self.check(Gesture::InsertMidpoint, coord)?;
        let result = self.session.insert_after(insert_after, coord);
        self.finish(Gesture::InsertMidpoint, result)
    }

    /// Click on a network marker: appends its exact location when drawing.
    pub fn on_entity_marker_click(&mut self, coord: Coordinate) -> RouteResult<bool> {
        self.append_if_drawing(Gesture::SnapToEntity, coord)
    }

    /// Remove the last point. Returns whether one was removed.
    pub fn undo_last_point(&mut self) -> RouteResult<bool> {
        self.check_gesture(Gesture::Undo)?;
        match self.session.undo_last_point() {
            Ok(changed) => {
                if changed {
                    self.refresh();
                }
                Ok(changed)
            }
            Err(e) => Err(self.report(Gesture::Undo, e)),
        }
    }

    /// Remove every point and resume drawing.
    pub fn clear(&mut self) -> RouteResult<()> {
        self.check_gesture(Gesture::Clear)?;
        self.session.clear();
        self.session.set_drawing(true);
        self.refresh();
        Ok(())
    }

    /// Switch between appending and editing. Returns false when idle.
    pub fn toggle_drawing(&mut self) -> bool {
        self.session.toggle_drawing()
    }

    /// Commit the working route through the continuation and close the edit.
    ///
    /// A single-point route is refused with `InsufficientPoints`; the session
    /// stays open and the continuation is not called.
    pub fn save(&mut self) -> RouteResult<()> {
        if !self.session.is_active() {
            return Err(self.report_save(RouteError::NoActiveSession));
        }
        let stored = persistence::prepare_save(self.session.route(), self.config.storage_encoding)
            .map_err(|e| self.report_save(e))?;
        log::info!("Saving route with {} points", self.session.route().len());
        (self.on_route_complete)(stored);
        self.close();
        Ok(())
    }

    /// Discard the working route without writing anything.
    pub fn cancel(&mut self) {
        if self.session.is_active() {
            log::debug!("Route edit cancelled");
        }
        self.close();
    }

    /// Dispatch an event. Returns whether the route changed.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> RouteResult<bool> {
        let before = self.session.route().clone();
        match event {
            SurfaceEvent::PrimaryClick { at } => return self.on_primary_click(at),
            SurfaceEvent::EntityMarkerClick { at } => return self.on_entity_marker_click(at),
            SurfaceEvent::HandleDragMove { index, to } => self.on_handle_drag_move(index, to)?,
            SurfaceEvent::HandleSecondaryAction { index } => {
                self.on_handle_secondary_action(index)?
            }
            SurfaceEvent::MidpointActivate { insert_after, at } => {
                self.on_midpoint_activate(insert_after, at)?
            }
            SurfaceEvent::ToggleDrawing => {
                self.toggle_drawing();
            }
            SurfaceEvent::Undo => return self.undo_last_point(),
            SurfaceEvent::Clear => self.clear()?,
            SurfaceEvent::Save => self.save()?,
            SurfaceEvent::Cancel => self.cancel(),
        }
        Ok(self.session.route() != &before)
    }

    /// Take the pending fit request, if the point count changed since the last one.
    pub fn take_fit_request(&mut self) -> Option<FitRequest> {
        self.pending_fit.take()
    }

    /// Derived geometry for the renderer.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The working route.
    pub fn route(&self) -> &Route {
        self.session.route()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn shell(&self) -> ShellKind {
        self.shell
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    /// Save is only offered with a path of at least 2 points.
    pub fn can_save(&self) -> bool {
        self.session.is_active() && self.session.route().len() >= 2
    }

    /// Where the map should look when there is no route to fit.
    pub fn view_center(&self) -> Coordinate {
        self.session
            .route()
            .first()
            .unwrap_or(self.config.default_center)
    }

    /// Center and zoom to show before any fit request arrives.
    pub fn initial_view(&self) -> MapView {
        MapView {
            center: self.view_center(),
            zoom: self.config.default_zoom,
        }
    }

    /// Handle under a pointer at `at`, within the configured hit tolerance.
    pub fn hit_test(&self, at: Coordinate) -> Option<HandleKind> {
        self.projection.hit_test_handle(at, self.config.hit_tolerance)
    }

    fn append_if_drawing(&mut self, gesture: Gesture, coord: Coordinate) -> RouteResult<bool> {
        let coord = self.check(gesture, coord)?;
        if !self.session.is_drawing() {
            return Ok(false);
        }
        let result = self.session.append(coord);
        self.finish(gesture, result).map(|()| true)
    }

    fn close(&mut self) {
        self.session.stop();
        self.session.clear();
        self.pending_fit = None;
        self.fitted_len = 0;
        self.projection = Projection::default();
    }

    fn check(&self, gesture: Gesture, coord: Coordinate) -> RouteResult<Coordinate> {
        self.check_gesture(gesture)?;
        Coordinate::try_new(coord.lat, coord.lng).map_err(|e| self.report(gesture, e))
    }

    fn check_gesture(&self, gesture: Gesture) -> RouteResult<()> {
        if self.shell.supports(gesture) {
            Ok(())
        } else {
            Err(self.report(
                gesture,
                RouteError::GestureNotSupported {
                    gesture: gesture.name(),
                    shell: self.shell.name(),
                },
            ))
        }
    }

    fn finish(&mut self, gesture: Gesture, result: RouteResult<()>) -> RouteResult<()> {
        match result {
            Ok(()) => {
                self.refresh();
                Ok(())
            }
            Err(e) => Err(self.report(gesture, e)),
        }
    }

    fn report(&self, gesture: Gesture, error: RouteError) -> RouteError {
        log::warn!("Rejected {} gesture: {}", gesture.name(), error);
        error
    }

    fn report_save(&self, error: RouteError) -> RouteError {
        log::warn!("Route not saved: {}", error);
        error
    }

    fn refresh(&mut self) {
        let route = self.session.route();
        let mut projection = Projection::compute(route, &self.style);
        if !self.shell.shows_insertion_markers() {
            projection.insertion_markers.clear();
        }

        if route.len() != self.fitted_len {
            self.fitted_len = route.len();
            self.pending_fit = projection.bounds.map(|bounds| FitRequest {
                bounds,
                padding: self.config.fit_padding,
            });
        }
        self.projection = projection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    type Saved = Rc<RefCell<Vec<Option<StoredRoute>>>>;

    fn editor(shell: ShellKind) -> (RouteEditor, Saved) {
        let saved: Saved = Rc::new(RefCell::new(Vec::new()));
        let sink = saved.clone();
        let editor = RouteEditor::new(shell, EditorConfig::default(), move |route| {
            sink.borrow_mut().push(route)
        });
        (editor, saved)
    }

    #[test]
    fn test_click_appends_only_while_drawing() {
        let (mut ed, _) = editor(ShellKind::Modal);
        assert_eq!(ed.on_primary_click(c(1.0, 1.0)), Ok(false));

        ed.open(None);
        assert_eq!(ed.on_primary_click(c(1.0, 1.0)), Ok(true));
        ed.toggle_drawing();
        assert_eq!(ed.on_primary_click(c(2.0, 2.0)), Ok(false));
        assert_eq!(ed.route().len(), 1);
    }

    #[test]
    fn test_projection_follows_edits() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(None);
        ed.on_primary_click(c(0.0, 0.0)).unwrap();
        assert!(!ed.projection().has_line());

        ed.on_primary_click(c(2.0, 2.0)).unwrap();
        assert!(ed.projection().has_line());
        assert_eq!(ed.projection().handles.len(), 2);
        assert_eq!(
            ed.projection().insertion_markers[0].kind,
            HandleKind::Midpoint { insert_after: 0 }
        );
    }

    #[test]
    fn test_drag_is_idempotent() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        for _ in 0..10 {
            ed.on_handle_drag_move(1, c(5.0, 5.0)).unwrap();
        }
        assert_eq!(ed.route().points(), &[c(0.0, 0.0), c(5.0, 5.0)]);
        assert_eq!(ed.projection().handles[1].position, c(5.0, 5.0));
    }

    #[test]
    fn test_stale_index_leaves_projection() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        let before = ed.projection().path.clone();
        assert_eq!(
            ed.on_handle_secondary_action(7),
            Err(RouteError::IndexOutOfRange { index: 7, len: 2 })
        );
        assert_eq!(ed.projection().path, before);
    }

    #[test]
    fn test_simple_shell_rejects_drag() {
        let (mut ed, _) = editor(ShellKind::Simple);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        assert!(matches!(
            ed.on_handle_drag_move(0, c(3.0, 3.0)),
            Err(RouteError::GestureNotSupported { .. })
        ));
        assert!(ed.projection().insertion_markers.is_empty());
        assert_eq!(ed.undo_last_point(), Ok(true));
    }

    #[test]
    fn test_entity_marker_only_on_overlay() {
        let (mut modal, _) = editor(ShellKind::Modal);
        modal.open(None);
        assert!(modal.on_entity_marker_click(c(1.0, 1.0)).is_err());

        let (mut overlay, _) = editor(ShellKind::Overlay);
        overlay.open(None);
        assert_eq!(overlay.on_entity_marker_click(c(1.0, 1.0)), Ok(true));
    }

    #[test]
    fn test_modal_opens_existing_route_for_editing() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        assert!(ed.is_active());
        assert!(!ed.is_drawing());
    }

    #[test]
    fn test_save_calls_continuation_once() {
        let (mut ed, saved) = editor(ShellKind::Modal);
        ed.open(None);
        ed.on_primary_click(c(10.0, 20.0)).unwrap();
        ed.on_primary_click(c(10.0, 21.0)).unwrap();
        ed.save().unwrap();

        assert_eq!(
            saved.borrow().as_slice(),
            &[Some(StoredRoute::Array(vec![[10.0, 20.0], [10.0, 21.0]]))]
        );
        assert!(!ed.is_active());
        assert!(ed.route().is_empty());
        assert_eq!(ed.save(), Err(RouteError::NoActiveSession));
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_save_empty_route_clears_custom_route() {
        let (mut ed, saved) = editor(ShellKind::Overlay);
        ed.open(None);
        ed.save().unwrap();
        assert_eq!(saved.borrow().as_slice(), &[None]);
    }

    #[test]
    fn test_save_single_point_refused() {
        let (mut ed, saved) = editor(ShellKind::Modal);
        ed.open(None);
        ed.on_primary_click(c(0.0, 0.0)).unwrap();
        assert!(!ed.can_save());
        assert_eq!(ed.save(), Err(RouteError::InsufficientPoints { count: 1 }));
        assert!(saved.borrow().is_empty());
        assert!(ed.is_active());
    }

    #[test]
    fn test_cancel_never_writes() {
        let (mut ed, saved) = editor(ShellKind::Modal);
        ed.open(None);
        ed.on_primary_click(c(0.0, 0.0)).unwrap();
        ed.on_primary_click(c(1.0, 1.0)).unwrap();
        ed.cancel();
        assert!(saved.borrow().is_empty());
        assert!(!ed.is_active());
        assert!(ed.route().is_empty());
    }

    #[test]
    fn test_fit_request_on_count_change() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(None);
        assert!(ed.take_fit_request().is_none());

        ed.on_primary_click(c(0.0, 0.0)).unwrap();
        let fit = ed.take_fit_request().unwrap();
        assert_eq!(fit.padding, 50.0);
        assert!(ed.take_fit_request().is_none());

        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        assert!(ed.take_fit_request().is_some());

        // Dragging keeps the count, no refit
        ed.on_handle_drag_move(0, c(0.5, 0.5)).unwrap();
        assert!(ed.take_fit_request().is_none());
    }

    #[test]
    fn test_clear_resumes_drawing() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(1.0, 1.0)])));
        assert!(!ed.is_drawing());
        ed.clear().unwrap();
        assert!(ed.is_drawing());
        assert!(ed.route().is_empty());
        assert!(ed.projection().handles.is_empty());
    }

    #[test]
    fn test_non_finite_click_rejected() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(None);
        assert!(matches!(
            ed.on_primary_click(c(f64::NAN, 0.0)),
            Err(RouteError::NonFiniteCoordinate { .. })
        ));
        assert!(ed.route().is_empty());
    }

    #[test]
    fn test_handle_event_dispatch() {
        let (mut ed, saved) = editor(ShellKind::Modal);
        ed.open(None);
        let events: Vec<SurfaceEvent> = serde_json::from_str(
            r#"[
                { "type": "primary_click", "at": [0, 0] },
                { "type": "primary_click", "at": [2, 2] },
                { "type": "midpoint_activate", "insert_after": 0, "at": [1, 1] },
                { "type": "toggle_drawing" },
                { "type": "primary_click", "at": [9, 9] }
            ]"#,
        )
        .unwrap();
        let changes: Vec<bool> = events
            .into_iter()
            .map(|e| ed.handle_event(e).unwrap())
            .collect();
        assert_eq!(changes, vec![true, true, true, false, false]);
        assert_eq!(ed.route().points(), &[c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)]);

        assert_eq!(ed.handle_event(SurfaceEvent::Save), Ok(true));
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_open_stored_string() {
        let (mut ed, _) = editor(ShellKind::Overlay);
        ed.open_stored(Some(&Value::String("[[1,2],[3,4]]".to_string())));
        assert_eq!(ed.route().len(), 2);
        assert_eq!(ed.view_center(), c(1.0, 2.0));

        ed.open_stored(Some(&Value::String("garbage".to_string())));
        assert!(ed.route().is_empty());
        assert_eq!(ed.view_center(), EditorConfig::default().default_center);
    }

    #[test]
    fn test_hit_test_uses_configured_tolerance() {
        let (mut ed, _) = editor(ShellKind::Modal);
        ed.open(Some(Route::from_points(vec![c(0.0, 0.0), c(2.0, 2.0)])));
        assert_eq!(ed.hit_test(c(0.0001, 0.0)), Some(HandleKind::Vertex(0)));
        assert_eq!(
            ed.hit_test(c(1.0, 1.0001)),
            Some(HandleKind::Midpoint { insert_after: 0 })
        );
        assert_eq!(ed.hit_test(c(0.001, 0.0)), None);

        let config = EditorConfig {
            hit_tolerance: 0.01,
            ..EditorConfig::default()
        };
        let mut wide = RouteEditor::new(ShellKind::Simple, config, |_| {});
        wide.open(Some(Route::from_points(vec![c(0.0, 0.0), c(2.0, 2.0)])));
        assert_eq!(wide.hit_test(c(0.001, 0.0)), Some(HandleKind::Vertex(0)));
        assert_eq!(wide.hit_test(c(1.0, 1.0)), None);
    }

    #[test]
    fn test_initial_view_uses_configured_zoom() {
        let config = EditorConfig {
            default_zoom: 16,
            ..EditorConfig::default()
        };
        let mut ed = RouteEditor::new(ShellKind::Overlay, config, |_| {});
        let view = ed.initial_view();
        assert_eq!(view.zoom, 16);
        assert_eq!(view.center, EditorConfig::default().default_center);

        ed.open(Some(Route::from_points(vec![c(3.0, 4.0), c(5.0, 6.0)])));
        assert_eq!(ed.initial_view(), MapView { center: c(3.0, 4.0), zoom: 16 });
    }
}
