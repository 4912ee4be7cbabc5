//! Persisting pending entries.
//!
//! A confirm is split in two so no borrow of the coordinator is held while
//! backend calls are awaited:
//!
//! 1. `begin_*_commit` validates, snapshots the pending set and marks the
//!    commit in flight.
//! 2. The returned commit is `run` against the backend. Entries are sent
//!    one by one and the run stops at the first failure, then the affected
//!    list is fetched again.
//! 3. `finish_*_commit` applies the outcome. Persisted entries leave the
//!    pending set; the failed entry and the ones never attempted stay.
//!
//! `confirm_*` chains the three steps.

use seatkit_core::{
    BackendError, CommitError, Error, InfoOverlay, Mode, Rectangle, RegistrationError,
    RegistrationEvent, RegistrationKind, ReservationBackend, Result, Seat, SeatId,
};

use super::{ModeCoordinator, PendingOverlay};

/// What a commit run did.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome<E, R> {
    /// Entries handed to the run, in order.
    pub entries: Vec<E>,
    /// Records returned for the first `persisted.len()` entries.
    pub persisted: Vec<R>,
    /// The failure that stopped the run, if any.
    pub failure: Option<BackendError>,
    /// Full list fetched after the run; None if that fetch failed.
    pub refreshed: Option<Vec<R>>,
}

impl<E, R> CommitOutcome<E, R> {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

pub type SeatCommitOutcome = CommitOutcome<(SeatId, Rectangle), Seat>;
pub type OverlayCommitOutcome = CommitOutcome<PendingOverlay, InfoOverlay>;

/// Snapshot of pending seat rectangles, in seat id order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCommit {
    entries: Vec<(SeatId, Rectangle)>,
}

impl SeatCommit {
    pub fn entries(&self) -> &[(SeatId, Rectangle)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sends every rectangle to the backend, stopping at the first failure.
    pub async fn run(self, backend: &dyn ReservationBackend) -> SeatCommitOutcome {
        let mut persisted = Vec::with_capacity(self.entries.len());
        let mut failure = None;
        for (seat_id, rect) in &self.entries {
            match backend.update_seat_rect(*seat_id, *rect).await {
                Ok(seat) => persisted.push(seat),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let refreshed = match backend.fetch_seats().await {
            Ok(seats) => Some(seats),
            Err(e) => {
                tracing::warn!("Could not refresh seats after commit: {}", e);
                None
            }
        };

        CommitOutcome {
            entries: self.entries,
            persisted,
            failure,
            refreshed,
        }
    }
}

/// Snapshot of pending overlays, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCommit {
    entries: Vec<PendingOverlay>,
}

impl OverlayCommit {
    pub fn entries(&self) -> &[PendingOverlay] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates every overlay through the backend, stopping at the first failure.
    pub async fn run(self, backend: &dyn ReservationBackend) -> OverlayCommitOutcome {
        let mut persisted = Vec::with_capacity(self.entries.len());
        let mut failure = None;
        for draft in &self.entries {
            match backend.add_overlay(&draft.name, draft.rect).await {
                Ok(overlay) => persisted.push(overlay),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let refreshed = match backend.fetch_overlays().await {
            Ok(overlays) => Some(overlays),
            Err(e) => {
                tracing::warn!("Could not refresh overlays after commit: {}", e);
                None
            }
        };

        CommitOutcome {
            entries: self.entries,
            persisted,
            failure,
            refreshed,
        }
    }
}

impl ModeCoordinator {
    pub fn seat_commit_in_flight(&self) -> bool {
        self.seat_commit_in_flight
    }

    pub fn overlay_commit_in_flight(&self) -> bool {
        self.overlay_commit_in_flight
    }

    /// Snapshots the pending seat rectangles for persisting.
    pub fn begin_seat_commit(&mut self) -> std::result::Result<SeatCommit, RegistrationError> {
        self.require_mode(Mode::SeatRegistration)?;
        if self.seat_commit_in_flight {
            return Err(self.reject(RegistrationError::CommitInFlight(RegistrationKind::Seats)));
        }
        if self.pending_seats.is_empty() {
            return Err(self.reject(RegistrationError::NothingPending(RegistrationKind::Seats)));
        }

        let entries: Vec<(SeatId, Rectangle)> =
            self.pending_seats.iter().map(|(id, r)| (*id, *r)).collect();
        self.seat_commit_in_flight = true;
        tracing::info!("Committing {} seat rectangle(s)", entries.len());
        self.publish(RegistrationEvent::CommitStarted {
            kind: RegistrationKind::Seats,
            count: entries.len(),
        });
        Ok(SeatCommit { entries })
    }

    /// Applies a seat commit outcome.
    ///
    /// On full success with nothing left pending the coordinator returns to
    /// idle. Returns the number of seats persisted.
    pub fn finish_seat_commit(&mut self, outcome: SeatCommitOutcome) -> Result<usize> {
        if !self.seat_commit_in_flight {
            return Err(self
                .reject(RegistrationError::NoCommitInFlight(RegistrationKind::Seats))
                .into());
        }
        self.seat_commit_in_flight = false;

        let persisted = outcome.persisted.len();
        for (seat_id, rect) in outcome.entries.iter().take(persisted) {
            // A rectangle redrawn while the commit ran stays pending.
            if self.pending_seats.get(seat_id) == Some(rect) {
                self.pending_seats.remove(seat_id);
            }
        }
        for seat in &outcome.persisted {
            match self.seats.iter_mut().find(|s| s.id == seat.id) {
                Some(existing) => *existing = seat.clone(),
                None => self.seats.push(seat.clone()),
            }
        }
        if let Some(seats) = outcome.refreshed {
            self.seats = seats;
        }

        self.settle(RegistrationKind::Seats, persisted, outcome.entries.len(), outcome.failure)
    }

    /// Snapshots the pending overlays for persisting.
    ///
    /// Every draft needs a non-empty name.
    pub fn begin_overlay_commit(
        &mut self,
    ) -> std::result::Result<OverlayCommit, RegistrationError> {
        self.require_mode(Mode::OverlayRegistration)?;
        if self.overlay_commit_in_flight {
            return Err(self.reject(RegistrationError::CommitInFlight(RegistrationKind::Overlays)));
        }
        if self.pending_overlays.is_empty() {
            return Err(self.reject(RegistrationError::NothingPending(RegistrationKind::Overlays)));
        }
        let unnamed = self.unnamed_overlay_count();
        if unnamed > 0 {
            return Err(self.reject(RegistrationError::UnnamedOverlays { count: unnamed }));
        }

        let entries = self.pending_overlays.clone();
        self.overlay_commit_in_flight = true;
        tracing::info!("Committing {} overlay(s)", entries.len());
        self.publish(RegistrationEvent::CommitStarted {
            kind: RegistrationKind::Overlays,
            count: entries.len(),
        });
        Ok(OverlayCommit { entries })
    }

    /// Applies an overlay commit outcome. Returns the number persisted.
    pub fn finish_overlay_commit(&mut self, outcome: OverlayCommitOutcome) -> Result<usize> {
        if !self.overlay_commit_in_flight {
            return Err(self
                .reject(RegistrationError::NoCommitInFlight(RegistrationKind::Overlays))
                .into());
        }
        self.overlay_commit_in_flight = false;

        let persisted = outcome.persisted.len();
        for draft in outcome.entries.iter().take(persisted) {
            // A draft renamed or redrawn while the commit ran stays pending.
            self.pending_overlays.retain(|o| o != draft);
        }
        match outcome.refreshed {
            Some(overlays) => self.overlays = overlays,
            None => self.overlays.extend(outcome.persisted),
        }

        self.settle(
            RegistrationKind::Overlays,
            persisted,
            outcome.entries.len(),
            outcome.failure,
        )
    }

    /// Persists every pending seat rectangle.
    pub async fn confirm_seat_registration(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<usize> {
        let commit = self.begin_seat_commit()?;
        let outcome = commit.run(backend).await;
        self.finish_seat_commit(outcome)
    }

    /// Persists every pending overlay.
    pub async fn confirm_overlay_registration(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<usize> {
        let commit = self.begin_overlay_commit()?;
        let outcome = commit.run(backend).await;
        self.finish_overlay_commit(outcome)
    }

    fn settle(
        &mut self,
        kind: RegistrationKind,
        persisted: usize,
        total: usize,
        failure: Option<BackendError>,
    ) -> Result<usize> {
        if let Some(source) = failure {
            let error = CommitError {
                kind,
                persisted,
                total,
                source,
            };
            tracing::warn!("{}", error);
            self.report_backend_error(commit_operation(kind), &error.source);
            self.publish(RegistrationEvent::CommitFailed {
                kind,
                persisted,
                remaining: error.remaining(),
            });
            return Err(Error::Commit(error));
        }

        tracing::info!("Committed {} {}", persisted, kind);
        self.publish(RegistrationEvent::CommitFinished { kind, persisted });

        let (mode, left) = match kind {
            RegistrationKind::Seats => (Mode::SeatRegistration, self.pending_seats.len()),
            RegistrationKind::Overlays => (Mode::OverlayRegistration, self.pending_overlays.len()),
        };
        if self.mode == mode && left == 0 {
            if kind == RegistrationKind::Seats {
                self.target_seat = None;
            }
            self.set_mode(Mode::Idle);
        }
        Ok(persisted)
    }
}

fn commit_operation(kind: RegistrationKind) -> &'static str {
    match kind {
        RegistrationKind::Seats => "update_seat_rect",
        RegistrationKind::Overlays => "add_overlay",
    }
}
