//! Persistence port
//!
//! Defines the backend trait the seat map drives. The map never owns the
//! seat, reservation or overlay tables; it reads snapshots and asks the
//! backend to change them.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::data::{InfoOverlay, OverlayId, Reservation, ReservationRequest, Seat, SeatId};
use crate::error::BackendResult;
use crate::geometry::Rectangle;

/// Backend trait for seats, reservations and information overlays
///
/// Implement this trait to plug in an in-memory store, a REST client or any
/// other storage. Calls are asynchronous and must not block the UI thread.
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    /// Fetch every seat, placed or not
    async fn fetch_seats(&self) -> BackendResult<Vec<Seat>>;

    /// Store a seat's rectangle and return the updated seat
    async fn update_seat_rect(&self, id: SeatId, rect: Rectangle) -> BackendResult<Seat>;

    /// Fetch the reservations made for `date`
    async fn fetch_reservations(&self, date: NaiveDate) -> BackendResult<Vec<Reservation>>;

    /// Reserve every seat of the request and return the created records
    async fn create_reservations(
        &self,
        request: ReservationRequest,
    ) -> BackendResult<Vec<Reservation>>;

    /// Cancel the reservation of `seat_id` on `date`
    async fn cancel_reservation(&self, seat_id: SeatId, date: NaiveDate) -> BackendResult<()>;

    /// Fetch the reservation of `seat_id` on `date`, if any
    async fn reservation_detail(
        &self,
        seat_id: SeatId,
        date: NaiveDate,
    ) -> BackendResult<Option<Reservation>>;

    /// Fetch every information overlay
    async fn fetch_overlays(&self) -> BackendResult<Vec<InfoOverlay>>;

    /// Create a named overlay and return it with its assigned id
    async fn add_overlay(&self, name: &str, rect: Rectangle) -> BackendResult<InfoOverlay>;

    /// Remove an overlay
    async fn remove_overlay(&self, id: OverlayId) -> BackendResult<()>;
}
