//! Registration mode coordinator.
//!
//! Holds the single active mode, the seat targeted for registration and the
//! rectangles captured but not yet persisted. Finalized drag rectangles are
//! routed here and land in the pending collection of the active mode.
//!
//! This module is split into submodules:
//! - `seats`: seat registration mode
//! - `overlays`: overlay registration mode and overlay deletion
//! - `commit`: persisting pending entries through the backend
//! - `roster`: per-seat registration status for the side panel

mod commit;
mod overlays;
mod roster;
mod seats;

pub use commit::{
    CommitOutcome, OverlayCommit, OverlayCommitOutcome, SeatCommit, SeatCommitOutcome,
};
pub use roster::{RosterEntry, SeatStatus};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use seatkit_core::{
    AppEvent, BackendResult, ErrorEvent, EventBus, InfoOverlay, Mode, OverlayId, PendingOverlayId,
    Rectangle, RegistrationError, RegistrationEvent, RegistrationKind, ReservationBackend, Seat,
    SeatId,
};

/// An overlay drawn in this session and not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOverlay {
    pub temp_id: PendingOverlayId,
    pub name: String,
    pub rect: Rectangle,
}

impl PendingOverlay {
    /// New unnamed draft.
    pub fn new(rect: Rectangle) -> Self {
        Self {
            temp_id: PendingOverlayId::new(),
            name: String::new(),
            rect,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Rules applied to finalized rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationPolicy {
    /// Keep rectangles with zero width or height (a click without a drag).
    pub accept_zero_area: bool,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            accept_zero_area: true,
        }
    }
}

/// Mode state machine plus the pending collections.
#[derive(Debug, Clone, Default)]
pub struct ModeCoordinator {
    mode: Mode,
    target_seat: Option<SeatId>,
    pending_seats: BTreeMap<SeatId, Rectangle>,
    pending_overlays: Vec<PendingOverlay>,
    seats: Vec<Seat>,
    overlays: Vec<InfoOverlay>,
    overlay_pending_delete: Option<OverlayId>,
    seat_commit_in_flight: bool,
    overlay_commit_in_flight: bool,
    policy: RegistrationPolicy,
    events: Option<Arc<EventBus>>,
}

impl ModeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Publishes state transitions on `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RegistrationPolicy) {
        self.policy = policy;
    }

    /// Seat that finalized rectangles are assigned to.
    pub fn target_seat(&self) -> Option<SeatId> {
        self.target_seat
    }

    pub fn pending_seats(&self) -> &BTreeMap<SeatId, Rectangle> {
        &self.pending_seats
    }

    pub fn pending_seat(&self, id: SeatId) -> Option<Rectangle> {
        self.pending_seats.get(&id).copied()
    }

    /// Pending overlays in drawing order.
    pub fn pending_overlays(&self) -> &[PendingOverlay] {
        &self.pending_overlays
    }

    /// Last known seat list.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Last known overlay list.
    pub fn overlays(&self) -> &[InfoOverlay] {
        &self.overlays
    }

    pub fn set_seats(&mut self, seats: Vec<Seat>) {
        self.seats = seats;
    }

    pub fn set_overlays(&mut self, overlays: Vec<InfoOverlay>) {
        self.overlays = overlays;
    }

    /// Loads seats and overlays from the backend.
    pub async fn load(&mut self, backend: &dyn ReservationBackend) -> BackendResult<()> {
        self.refresh_seats(backend).await?;
        self.refresh_overlays(backend).await
    }

    pub async fn refresh_seats(&mut self, backend: &dyn ReservationBackend) -> BackendResult<()> {
        match backend.fetch_seats().await {
            Ok(seats) => {
                tracing::debug!("Loaded {} seats", seats.len());
                self.seats = seats;
                Ok(())
            }
            Err(e) => {
                self.report_backend_error("fetch_seats", &e);
                Err(e)
            }
        }
    }

    pub async fn refresh_overlays(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> BackendResult<()> {
        match backend.fetch_overlays().await {
            Ok(overlays) => {
                tracing::debug!("Loaded {} overlays", overlays.len());
                self.overlays = overlays;
                Ok(())
            }
            Err(e) => {
                self.report_backend_error("fetch_overlays", &e);
                Err(e)
            }
        }
    }

    /// Routes a finalized drag rectangle to the active mode's pending set.
    ///
    /// Returns `Ok(false)` when the policy drops a zero-area rectangle.
    pub fn on_rectangle_finalized(&mut self, rect: Rectangle) -> Result<bool, RegistrationError> {
        match self.mode {
            Mode::Idle => Err(self.reject(RegistrationError::WrongMode {
                required: Mode::SeatRegistration,
                current: Mode::Idle,
            })),
            Mode::SeatRegistration => {
                let Some(seat_id) = self.target_seat else {
                    return Err(self.reject(RegistrationError::NoSeatTargeted));
                };
                if !self.accepts(&rect) {
                    return Ok(false);
                }
                self.pending_seats.insert(seat_id, rect);
                tracing::debug!("Seat {} pending at {}", seat_id, rect);
                self.publish(RegistrationEvent::SeatRectPending { seat_id, rect });
                Ok(true)
            }
            Mode::OverlayRegistration => {
                if !self.accepts(&rect) {
                    return Ok(false);
                }
                let draft = PendingOverlay::new(rect);
                tracing::debug!("Overlay {} drafted at {}", draft.temp_id, rect);
                self.publish(RegistrationEvent::OverlayDrafted {
                    temp_id: draft.temp_id,
                    rect,
                });
                self.pending_overlays.push(draft);
                Ok(true)
            }
        }
    }

    fn accepts(&self, rect: &Rectangle) -> bool {
        if rect.is_degenerate() && !self.policy.accept_zero_area {
            tracing::debug!("Dropping zero-area rectangle {}", rect);
            return false;
        }
        true
    }

    fn set_mode(&mut self, to: Mode) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        tracing::info!("Mode changed: {} -> {}", from, to);
        self.publish(RegistrationEvent::ModeChanged { from, to });
    }

    fn require_mode(&self, required: Mode) -> Result<(), RegistrationError> {
        if self.mode != required {
            return Err(self.reject(RegistrationError::WrongMode {
                required,
                current: self.mode,
            }));
        }
        Ok(())
    }

    /// Leaving or entering a mode waits for an outstanding commit of `kind`.
    fn require_no_commit(&self, kind: RegistrationKind) -> Result<(), RegistrationError> {
        let in_flight = match kind {
            RegistrationKind::Seats => self.seat_commit_in_flight,
            RegistrationKind::Overlays => self.overlay_commit_in_flight,
        };
        if in_flight {
            return Err(self.reject(RegistrationError::CommitInFlight(kind)));
        }
        Ok(())
    }

    fn reject(&self, error: RegistrationError) -> RegistrationError {
        tracing::warn!("Rejected: {}", error);
        error
    }

    fn publish(&self, event: RegistrationEvent) {
        if let Some(bus) = &self.events {
            bus.publish(AppEvent::Registration(event));
        }
    }

    fn report_backend_error(&self, operation: &str, error: &seatkit_core::BackendError) {
        tracing::warn!("Backend call {} failed: {}", operation, error);
        if let Some(bus) = &self.events {
            bus.publish(AppEvent::Error(ErrorEvent::Backend {
                operation: operation.to_string(),
                message: error.to_string(),
            }));
        }
    }
}
