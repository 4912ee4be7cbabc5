//! Seat registration mode.

use seatkit_core::{Mode, RegistrationError, RegistrationEvent, RegistrationKind, SeatId};

use super::ModeCoordinator;

impl ModeCoordinator {
    /// Enters seat registration from idle with an empty pending set.
    pub fn enter_seat_registration(&mut self) -> Result<(), RegistrationError> {
        if self.mode != Mode::Idle {
            return Err(self.reject(RegistrationError::ModeBusy {
                current: self.mode,
                requested: Mode::SeatRegistration,
            }));
        }
        self.require_no_commit(RegistrationKind::Seats)?;
        // Leftovers from an aborted session never survive into a new one.
        self.pending_seats.clear();
        self.target_seat = None;
        self.set_mode(Mode::SeatRegistration);
        Ok(())
    }

    /// Targets `seat_id` for the next drawn rectangle.
    ///
    /// Pending rectangles of other seats are kept. Once the seat list is
    /// loaded, only seats in it can be targeted.
    pub fn select_seat_for_registration(
        &mut self,
        seat_id: SeatId,
    ) -> Result<(), RegistrationError> {
        self.require_mode(Mode::SeatRegistration)?;
        if !self.seats.is_empty() && self.seat(seat_id).is_none() {
            return Err(self.reject(RegistrationError::UnknownSeat(seat_id)));
        }
        if self.target_seat != Some(seat_id) {
            self.target_seat = Some(seat_id);
            tracing::debug!("Targeting seat {}", seat_id);
            self.publish(RegistrationEvent::SeatTargeted { seat_id });
        }
        Ok(())
    }

    /// Discards every pending seat rectangle and returns to idle.
    ///
    /// Refused while a seat commit is in flight.
    pub fn cancel_seat_registration(&mut self) -> Result<(), RegistrationError> {
        self.require_mode(Mode::SeatRegistration)?;
        self.require_no_commit(RegistrationKind::Seats)?;
        self.discard_pending_seats();
        self.set_mode(Mode::Idle);
        Ok(())
    }

    /// Header button: leaves seat registration if active, otherwise enters
    /// it, cancelling overlay registration first.
    pub fn toggle_seat_registration(&mut self) -> Result<(), RegistrationError> {
        match self.mode {
            Mode::SeatRegistration => self.cancel_seat_registration(),
            Mode::OverlayRegistration => {
                self.cancel_overlay_registration()?;
                self.enter_seat_registration()
            }
            Mode::Idle => self.enter_seat_registration(),
        }
    }

    /// True when a confirm would be accepted right now.
    pub fn can_confirm_seats(&self) -> bool {
        self.mode == Mode::SeatRegistration
            && !self.pending_seats.is_empty()
            && !self.seat_commit_in_flight
    }

    pub(super) fn discard_pending_seats(&mut self) {
        let count = self.pending_seats.len();
        self.pending_seats.clear();
        self.target_seat = None;
        if count > 0 {
            tracing::info!("Discarded {} pending seat rectangle(s)", count);
            self.publish(RegistrationEvent::Discarded {
                kind: RegistrationKind::Seats,
                count,
            });
        }
    }
}
