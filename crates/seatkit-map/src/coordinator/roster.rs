//! Per-seat registration status, as listed beside the map while registering.

use serde::{Deserialize, Serialize};

use seatkit_core::{Seat, SeatId};

use super::ModeCoordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Has a rectangle waiting to be confirmed.
    Pending,
    /// Has persisted coordinates.
    Registered,
    Unregistered,
}

/// One line of the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub seat_id: SeatId,
    pub name: String,
    pub status: SeatStatus,
    /// The seat rectangles are currently drawn for.
    pub targeted: bool,
}

impl ModeCoordinator {
    /// Status of `seat`. A pending rectangle wins over persisted coordinates.
    pub fn seat_status(&self, seat: &Seat) -> SeatStatus {
        if self.pending_seats.contains_key(&seat.id) {
            SeatStatus::Pending
        } else if seat.is_placed() {
            SeatStatus::Registered
        } else {
            SeatStatus::Unregistered
        }
    }

    /// Every known seat with its status, in seat list order.
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.seats
            .iter()
            .map(|seat| RosterEntry {
                seat_id: seat.id,
                name: seat.name.clone(),
                status: self.seat_status(seat),
                targeted: self.target_seat == Some(seat.id),
            })
            .collect()
    }

    /// Seats without persisted coordinates.
    pub fn unplaced_seats(&self) -> Vec<&Seat> {
        self.seats.iter().filter(|s| !s.is_placed()).collect()
    }
}
