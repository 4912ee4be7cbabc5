//! Booking workflow: date, seat selection, reservation form and detail.
//!
//! Seat clicks are ignored while a registration mode is active. A click on
//! a reserved seat opens its reservation detail; any other seat toggles in
//! and out of the selection. The form reserves every selected seat at once.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

use seatkit_core::{
    AppEvent, BackendError, BookingError, BookingEvent, ErrorEvent, EventBus, Mode, Reservation,
    ReservationBackend, ReservationRequest, Result, SeatId,
};

/// Fields of the reservation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    pub name: String,
    pub department: String,
}

/// The dialog currently shown, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingDialog {
    #[default]
    Closed,
    Form(ReservationForm),
    Detail(Reservation),
}

/// Result of clicking a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatClick {
    Ignored,
    Selected(SeatId),
    Deselected(SeatId),
    DetailOpened(Reservation),
}

/// Booking state for one viewed date.
#[derive(Debug, Clone)]
pub struct BookingSession {
    date: NaiveDate,
    reservations: Vec<Reservation>,
    selection: BTreeSet<SeatId>,
    dialog: BookingDialog,
    events: Option<Arc<EventBus>>,
}

impl BookingSession {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            reservations: Vec::new(),
            selection: BTreeSet::new(),
            dialog: BookingDialog::Closed,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Reservations of the viewed date.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn selection(&self) -> &BTreeSet<SeatId> {
        &self.selection
    }

    pub fn dialog(&self) -> &BookingDialog {
        &self.dialog
    }

    pub fn reservation_for(&self, seat_id: SeatId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.seat_id == seat_id)
    }

    pub fn is_reserved(&self, seat_id: SeatId) -> bool {
        self.reservation_for(seat_id).is_some()
    }

    /// Fetches the reservations of the viewed date.
    pub async fn load(&mut self, backend: &dyn ReservationBackend) -> Result<()> {
        match backend.fetch_reservations(self.date).await {
            Ok(reservations) => {
                tracing::debug!("{} reservation(s) on {}", reservations.len(), self.date);
                self.reservations = reservations;
                Ok(())
            }
            Err(e) => Err(self.backend_failure("fetch_reservations", e)),
        }
    }

    /// Switches the viewed date. The selection is cleared and the
    /// reservations of the new date are loaded.
    pub async fn change_date(
        &mut self,
        date: NaiveDate,
        backend: &dyn ReservationBackend,
    ) -> Result<()> {
        self.date = date;
        self.reservations.clear();
        self.dialog = BookingDialog::Closed;
        self.clear_selection();
        tracing::info!("Viewing reservations for {}", date);
        self.publish(BookingEvent::DateChanged { date });
        self.load(backend).await
    }

    /// Handles a click on a seat.
    pub async fn click_seat(
        &mut self,
        seat_id: SeatId,
        mode: Mode,
        backend: &dyn ReservationBackend,
    ) -> Result<SeatClick> {
        if mode.is_registration() {
            return Ok(SeatClick::Ignored);
        }

        if self.is_reserved(seat_id) {
            let detail = match backend.reservation_detail(seat_id, self.date).await {
                Ok(detail) => detail,
                Err(e) => return Err(self.backend_failure("reservation_detail", e)),
            };
            return match detail {
                Some(reservation) => {
                    self.dialog = BookingDialog::Detail(reservation.clone());
                    Ok(SeatClick::DetailOpened(reservation))
                }
                None => {
                    // Cancelled elsewhere since the last load.
                    self.load(backend).await?;
                    Ok(SeatClick::Ignored)
                }
            };
        }

        let click = if self.selection.remove(&seat_id) {
            SeatClick::Deselected(seat_id)
        } else {
            self.selection.insert(seat_id);
            SeatClick::Selected(seat_id)
        };
        self.publish_selection();
        Ok(click)
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.publish_selection();
        }
    }

    /// Opens the reservation form for the current selection.
    pub fn open_reservation_form(&mut self, mode: Mode) -> std::result::Result<(), BookingError> {
        if mode.is_registration() {
            return Err(BookingError::RegistrationActive(mode));
        }
        if self.selection.is_empty() {
            return Err(BookingError::EmptySelection);
        }
        self.dialog = BookingDialog::Form(ReservationForm::default());
        Ok(())
    }

    /// The open form, for editing its fields.
    pub fn form_mut(&mut self) -> Option<&mut ReservationForm> {
        match &mut self.dialog {
            BookingDialog::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = BookingDialog::Closed;
    }

    /// Reserves every selected seat with the form's name and department.
    ///
    /// On success the form closes, the selection is cleared and the
    /// reservations are reloaded.
    pub async fn submit_reservation(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<Vec<Reservation>> {
        let BookingDialog::Form(form) = &self.dialog else {
            return Err(BookingError::FormClosed.into());
        };
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(BookingError::MissingName.into());
        }
        if self.selection.is_empty() {
            return Err(BookingError::EmptySelection.into());
        }

        let request = ReservationRequest {
            seat_ids: self.selection.iter().copied().collect(),
            date: self.date,
            name,
            department: form.department.trim().to_string(),
        };
        let seat_ids = request.seat_ids.clone();
        let created = match backend.create_reservations(request).await {
            Ok(created) => created,
            Err(e) => return Err(self.backend_failure("create_reservations", e)),
        };

        tracing::info!("Reserved {} seat(s) on {}", created.len(), self.date);
        self.publish(BookingEvent::Reserved {
            seat_ids,
            date: self.date,
        });
        self.dialog = BookingDialog::Closed;
        self.clear_selection();
        self.load(backend).await?;
        Ok(created)
    }

    /// Cancels the reservation shown in the detail dialog.
    pub async fn cancel_open_reservation(
        &mut self,
        backend: &dyn ReservationBackend,
    ) -> Result<()> {
        let BookingDialog::Detail(reservation) = &self.dialog else {
            return Err(BookingError::NoDetailOpen.into());
        };
        let seat_id = reservation.seat_id;
        let date = reservation.date;
        if let Err(e) = backend.cancel_reservation(seat_id, date).await {
            return Err(self.backend_failure("cancel_reservation", e));
        }

        tracing::info!("Cancelled reservation of seat {} on {}", seat_id, date);
        self.publish(BookingEvent::ReservationCancelled { seat_id, date });
        self.dialog = BookingDialog::Closed;
        self.load(backend).await
    }

    fn publish_selection(&self) {
        self.publish(BookingEvent::SelectionChanged {
            selected: self.selection.iter().copied().collect(),
        });
    }

    fn publish(&self, event: BookingEvent) {
        if let Some(bus) = &self.events {
            bus.publish(AppEvent::Booking(event));
        }
    }

    fn backend_failure(&self, operation: &str, error: BackendError) -> seatkit_core::Error {
        tracing::warn!("Backend call {} failed: {}", operation, error);
        if let Some(bus) = &self.events {
            bus.publish(AppEvent::Error(ErrorEvent::Backend {
                operation: operation.to_string(),
                message: error.to_string(),
            }));
        }
        error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[test]
    fn test_form_needs_selection_and_idle() {
        let mut session = BookingSession::new(date());
        assert_eq!(
            session.open_reservation_form(Mode::Idle),
            Err(BookingError::EmptySelection)
        );
        assert_eq!(
            session.open_reservation_form(Mode::SeatRegistration),
            Err(BookingError::RegistrationActive(Mode::SeatRegistration))
        );
        assert_eq!(session.dialog(), &BookingDialog::Closed);
        assert!(session.form_mut().is_none());
    }
}
