//! Overlay registration mode and overlay deletion.

use seatkit_core::{
    AppEvent, BackendError, BookingError, BookingEvent, Mode, OverlayId, PendingOverlayId,
    RegistrationError, RegistrationEvent, RegistrationKind, ReservationBackend, Result,
};

use super::ModeCoordinator;

impl ModeCoordinator {
    /// Enters overlay registration from idle with no drafts.
    pub fn enter_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        if self.mode != Mode::Idle {
            return Err(self.reject(RegistrationError::ModeBusy {
                current: self.mode,
                requested: Mode::OverlayRegistration,
            }));
        }
        self.require_no_commit(RegistrationKind::Overlays)?;
        self.pending_overlays.clear();
        self.set_mode(Mode::OverlayRegistration);
        Ok(())
    }

    /// Discards every draft and returns to idle. Refused while an overlay
    /// commit is in flight.
    pub fn cancel_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        self.require_mode(Mode::OverlayRegistration)?;
        self.require_no_commit(RegistrationKind::Overlays)?;
        self.discard_pending_overlays();
        self.overlay_pending_delete = None;
        self.set_mode(Mode::Idle);
        Ok(())
    }

    /// Header button: leaves overlay registration if active, otherwise
    /// enters it, cancelling seat registration first.
    pub fn toggle_overlay_registration(&mut self) -> std::result::Result<(), RegistrationError> {
        match self.mode {
            Mode::OverlayRegistration => self.cancel_overlay_registration(),
            Mode::SeatRegistration => {
                self.cancel_seat_registration()?;
                self.enter_overlay_registration()
            }
            Mode::Idle => self.enter_overlay_registration(),
        }
    }

    /// Renames exactly one draft.
    pub fn rename_pending_overlay(
        &mut self,
        temp_id: PendingOverlayId,
        name: impl Into<String>,
    ) -> std::result::Result<(), RegistrationError> {
        self.require_mode(Mode::OverlayRegistration)?;
        let Some(draft) = self
            .pending_overlays
            .iter_mut()
            .find(|o| o.temp_id == temp_id)
        else {
            return Err(self.reject(RegistrationError::UnknownPendingOverlay(temp_id)));
        };
        draft.name = name.into();
        let name = draft.name.clone();
        self.publish(RegistrationEvent::OverlayRenamed { temp_id, name });
        Ok(())
    }

    /// Number of drafts still waiting for a name.
    pub fn unnamed_overlay_count(&self) -> usize {
        self.pending_overlays.iter().filter(|o| !o.is_named()).count()
    }

    /// True when a confirm would be accepted right now.
    pub fn can_confirm_overlays(&self) -> bool {
        self.mode == Mode::OverlayRegistration
            && !self.pending_overlays.is_empty()
            && self.unnamed_overlay_count() == 0
            && !self.overlay_commit_in_flight
    }

    /// Clicking a persisted overlay while registering overlays asks for
    /// confirmation before deleting it.
    pub fn request_overlay_delete(&mut self, id: OverlayId) -> Result<()> {
        self.require_mode(Mode::OverlayRegistration)?;
        if !self.overlays.iter().any(|o| o.id == id) {
            return Err(BackendError::OverlayNotFound(id).into());
        }
        self.overlay_pending_delete = Some(id);
        Ok(())
    }

    /// Overlay awaiting delete confirmation.
    pub fn overlay_pending_delete(&self) -> Option<OverlayId> {
        self.overlay_pending_delete
    }

    pub fn dismiss_overlay_delete(&mut self) {
        self.overlay_pending_delete = None;
    }

    /// Deletes the overlay awaiting confirmation and reloads the overlay list.
    pub async fn confirm_overlay_delete(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<OverlayId> {
        let id = self
            .overlay_pending_delete
            .ok_or(BookingError::NoOverlayPendingDelete)?;
        if let Err(e) = backend.remove_overlay(id).await {
            self.report_backend_error("remove_overlay", &e);
            return Err(e.into());
        }
        self.overlay_pending_delete = None;
        tracing::info!("Removed overlay {}", id);
        if let Some(bus) = &self.events {
            bus.publish(AppEvent::Booking(BookingEvent::OverlayRemoved { id }));
        }
        if self.refresh_overlays(backend).await.is_err() {
            self.overlays.retain(|o| o.id != id);
        }
        Ok(id)
    }

    pub(super) fn discard_pending_overlays(&mut self) {
        let count = self.pending_overlays.len();
        self.pending_overlays.clear();
        if count > 0 {
            tracing::info!("Discarded {} pending overlay(s)", count);
            self.publish(RegistrationEvent::Discarded {
                kind: RegistrationKind::Overlays,
                count,
            });
        }
    }
}
