//! Seat map canvas.
//!
//! Owns the viewport, the native navigation controls, the drag gesture and
//! the mode coordinator, and routes container input between them. Every
//! mode change goes through here so that navigation suppression and drag
//! abort happen in one place.

use std::collections::BTreeSet;
use std::sync::Arc;

use seatkit_core::{
    AppEvent, EventBus, Mode, NavigationEvent, OverlayId, PendingOverlayId, Point, Rectangle,
    RegistrationError, ReservationBackend, Reservation, Result, SeatId,
};

use crate::coordinator::{
    ModeCoordinator, OverlayCommit, OverlayCommitOutcome, SeatCommit, SeatCommitOutcome,
};
use crate::display::{MapScene, SeatPalette};
use crate::drag::{drag_eligible, DragGesture};
use crate::input::{NavigationKey, PointerEvent, PointerKind};
use crate::navigation::{Gesture, NavigationControls, NavigationSync};
use crate::viewport::Viewport;

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    DragStarted,
    CandidateUpdated(Rectangle),
    /// The drag produced a rectangle that is now pending.
    Finalized(Rectangle),
    /// The drag ended without a pending entry.
    Dropped,
    Aborted,
    Panned,
}

/// Interactive seat map.
#[derive(Debug, Clone)]
pub struct SeatMap {
    viewport: Viewport,
    controls: NavigationControls,
    nav_sync: NavigationSync,
    drag: DragGesture,
    coordinator: ModeCoordinator,
    pan_anchor: Option<(f64, f64)>,
    last_mode: Mode,
    events: Option<Arc<EventBus>>,
}

impl SeatMap {
    pub fn new(viewport: Viewport, coordinator: ModeCoordinator) -> Self {
        let mut map = Self {
            viewport,
            controls: NavigationControls::default(),
            nav_sync: NavigationSync::new(),
            drag: DragGesture::new(),
            last_mode: coordinator.mode(),
            coordinator,
            pan_anchor: None,
            events: None,
        };
        map.after_mode_change();
        map
    }

    /// Publishes navigation and registration events on `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.coordinator = std::mem::take(&mut self.coordinator).with_event_bus(bus.clone());
        self.events = Some(bus);
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn controls(&self) -> NavigationControls {
        self.controls
    }

    pub fn drag(&self) -> &DragGesture {
        &self.drag
    }

    pub fn coordinator(&self) -> &ModeCoordinator {
        &self.coordinator
    }

    pub fn mode(&self) -> Mode {
        self.coordinator.mode()
    }

    /// Dashed preview of the drag in progress.
    pub fn candidate(&self) -> Option<Rectangle> {
        self.drag.candidate()
    }

    pub fn pixel_to_world(&self, x: f64, y: f64) -> Point {
        self.viewport.pixel_to_world(x, y)
    }

    /// Runs `f` on the coordinator, then resyncs navigation and the drag.
    pub fn update_coordinator<R>(&mut self, f: impl FnOnce(&mut ModeCoordinator) -> R) -> R {
        let result = f(&mut self.coordinator);
        self.after_mode_change();
        result
    }

    pub fn enter_seat_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.enter_seat_registration())
    }

    pub fn select_seat_for_registration(
        &mut self,
        seat_id: SeatId,
    ) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.select_seat_for_registration(seat_id))
    }

    pub fn cancel_seat_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.cancel_seat_registration())
    }

    pub fn toggle_seat_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.toggle_seat_registration())
    }

    pub fn enter_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.enter_overlay_registration())
    }

    pub fn cancel_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.cancel_overlay_registration())
    }

    pub fn toggle_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.update_coordinator(|c| c.toggle_overlay_registration())
    }

    pub fn rename_pending_overlay(
        &mut self,
        temp_id: PendingOverlayId,
        name: impl Into<String>,
    ) -> std::result::Result<(), RegistrationError> {
        self.coordinator.rename_pending_overlay(temp_id, name)
    }

    pub fn begin_seat_commit(&mut self) -> std::result::Result<SeatCommit, RegistrationError> {
        self.coordinator.begin_seat_commit()
    }

    pub fn finish_seat_commit(&mut self, outcome: SeatCommitOutcome) -> Result<usize> {
        self.update_coordinator(|c| c.finish_seat_commit(outcome))
    }

    pub fn begin_overlay_commit(
        &mut self,
    ) -> std::result::Result<OverlayCommit, RegistrationError> {
        self.coordinator.begin_overlay_commit()
    }

    pub fn finish_overlay_commit(&mut self, outcome: OverlayCommitOutcome) -> Result<usize> {
        self.update_coordinator(|c| c.finish_overlay_commit(outcome))
    }

    pub async fn confirm_seat_registration(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<usize> {
        let commit = self.begin_seat_commit()?;
        let outcome = commit.run(backend).await;
        self.finish_seat_commit(outcome)
    }

    pub async fn confirm_overlay_registration(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<usize> {
        let commit = self.begin_overlay_commit()?;
        let outcome = commit.run(backend).await;
        self.finish_overlay_commit(outcome)
    }

    pub fn request_overlay_delete(&mut self, id: OverlayId) -> Result<()> {
        self.coordinator.request_overlay_delete(id)
    }

    pub fn dismiss_overlay_delete(&mut self) {
        self.coordinator.dismiss_overlay_delete();
    }

    pub async fn confirm_overlay_delete(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<OverlayId> {
        self.coordinator.confirm_overlay_delete(backend).await
    }

    /// Routes a pointer event.
    ///
    /// In a registration mode presses feed the drag gesture; in idle a
    /// primary-button drag pans the map if dragging is enabled.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        let point = self.viewport.pixel_to_world(event.x, event.y);
        match event.kind {
            PointerKind::Down => {
                let mode = self.coordinator.mode();
                if mode.is_registration() {
                    let eligible = drag_eligible(mode, self.coordinator.target_seat().is_some());
                    if self.drag.press(point, eligible) {
                        return PointerOutcome::DragStarted;
                    }
                } else if self.controls.allows(Gesture::Dragging) && event.is_primary_held() {
                    self.pan_anchor = Some(event.position());
                }
                PointerOutcome::Ignored
            }
            PointerKind::Move => {
                if self.drag.is_dragging() {
                    return match self.drag.motion(point, event.is_primary_held()) {
                        Some(rect) => PointerOutcome::CandidateUpdated(rect),
                        None => PointerOutcome::Ignored,
                    };
                }
                match self.pan_anchor {
                    Some((ax, ay))
                        if event.is_primary_held() && self.controls.allows(Gesture::Dragging) =>
                    {
                        self.viewport.pan_by(event.x - ax, event.y - ay);
                        self.pan_anchor = Some(event.position());
                        PointerOutcome::Panned
                    }
                    _ => PointerOutcome::Ignored,
                }
            }
            PointerKind::Up => {
                self.pan_anchor = None;
                if !self.drag.is_dragging() {
                    return PointerOutcome::Ignored;
                }
                let Some(rect) = self.drag.release() else {
                    return PointerOutcome::Dropped;
                };
                match self.coordinator.on_rectangle_finalized(rect) {
                    Ok(true) => PointerOutcome::Finalized(rect),
                    Ok(false) | Err(_) => PointerOutcome::Dropped,
                }
            }
            PointerKind::Cancel | PointerKind::Leave => {
                self.pan_anchor = None;
                if self.drag.abort() {
                    PointerOutcome::Aborted
                } else {
                    PointerOutcome::Ignored
                }
            }
        }
    }

    /// Wheel zoom at the cursor. Negative `delta_y` zooms in.
    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        if !self.controls.allows(Gesture::ScrollWheelZoom) || delta_y == 0.0 {
            return false;
        }
        let step = if delta_y < 0.0 { 1.0 } else { -1.0 };
        let anchor = self.viewport.pixel_to_world(x, y);
        self.viewport.zoom_to_point(&anchor, self.viewport.zoom() + step);
        true
    }

    /// Double click zooms in one level at the cursor.
    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        if !self.controls.allows(Gesture::DoubleClickZoom) {
            return false;
        }
        let anchor = self.viewport.pixel_to_world(x, y);
        self.viewport.zoom_to_point(&anchor, self.viewport.zoom() + 1.0);
        true
    }

    /// Pinch around `(x, y)` by `zoom_delta` levels.
    pub fn handle_pinch(&mut self, x: f64, y: f64, zoom_delta: f64) -> bool {
        if !self.controls.allows(Gesture::TouchZoom) {
            return false;
        }
        let anchor = self.viewport.pixel_to_world(x, y);
        self.viewport.zoom_to_point(&anchor, self.viewport.zoom() + zoom_delta);
        true
    }

    pub fn handle_key(&mut self, key: NavigationKey) -> bool {
        if !self.controls.allows(Gesture::Keyboard) {
            return false;
        }
        match key {
            NavigationKey::ZoomIn => self.viewport.zoom_in(),
            NavigationKey::ZoomOut => self.viewport.zoom_out(),
            _ => {
                if let Some((dx, dy)) = key.pan_delta() {
                    self.viewport.pan_by(dx, dy);
                }
            }
        }
        true
    }

    /// Everything to draw for the current state.
    pub fn scene(
        &self,
        reservations: &[Reservation],
        selection: &BTreeSet<SeatId>,
        palette: &SeatPalette,
    ) -> MapScene {
        MapScene::build(
            &self.coordinator,
            self.drag.candidate(),
            reservations,
            selection,
            palette,
        )
    }

    fn after_mode_change(&mut self) {
        let mode = self.coordinator.mode();
        if mode != self.last_mode {
            self.drag.abort();
            self.pan_anchor = None;
            self.last_mode = mode;
        }
        if let Some(suppressed) = self.nav_sync.sync(mode, &mut self.controls) {
            if suppressed {
                self.pan_anchor = None;
            }
            if let Some(bus) = &self.events {
                bus.publish(AppEvent::Navigation(NavigationEvent::SuppressionChanged {
                    suppressed,
                }));
            }
        }
    }
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::new(Viewport::default(), ModeCoordinator::new())
    }
}
