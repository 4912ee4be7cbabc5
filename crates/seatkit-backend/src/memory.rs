use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};

use seatkit_core::{
    BackendError, BackendResult, InfoOverlay, OverlayId, Rectangle, Reservation, ReservationBackend,
    ReservationId, ReservationRequest, Seat, SeatId,
};

/// The three tables the backend keeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub seats: Vec<Seat>,
    pub reservations: Vec<Reservation>,
    pub overlays: Vec<InfoOverlay>,
}

/// Scripted write failure, used to exercise partial commits.
#[derive(Debug, Clone)]
struct FailurePlan {
    successes_left: usize,
    error: BackendError,
}

/// Backend keeping everything in memory.
///
/// Thread safe so it can be shared behind an `Arc` with async tasks.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tables: RwLock<Tables>,
    failure: Mutex<Option<FailurePlan>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with seats `1..=count`, all unplaced, named "Seat N".
    pub fn seeded(count: u32) -> Self {
        let seats = (1..=count)
            .map(|i| Seat::unplaced(SeatId(i), format!("Seat {}", i)))
            .collect();
        Self::with_tables(Tables {
            seats,
            ..Default::default()
        })
    }

    /// Creates a backend from prepared tables.
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
            failure: Mutex::new(None),
        }
    }

    /// Copy of the current tables.
    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }

    /// Lets `successes` more writes through, then fails the next one with
    /// `error`. The plan is consumed by that failure.
    pub fn fail_writes_after(&self, successes: usize, error: BackendError) {
        *self.failure.lock() = Some(FailurePlan {
            successes_left: successes,
            error,
        });
    }

    fn check_write(&self, operation: &str) -> BackendResult<()> {
        let mut failure = self.failure.lock();
        let Some(plan) = failure.as_mut() else {
            return Ok(());
        };
        if plan.successes_left > 0 {
            plan.successes_left -= 1;
            return Ok(());
        }
        let error = plan.error.clone();
        *failure = None;
        tracing::debug!("Injected failure on {}: {}", operation, error);
        Err(error)
    }
}

#[async_trait]
impl ReservationBackend for InMemoryBackend {
    async fn fetch_seats(&self) -> BackendResult<Vec<Seat>> {
        Ok(self.tables.read().seats.clone())
    }

    async fn update_seat_rect(&self, id: SeatId, rect: Rectangle) -> BackendResult<Seat> {
        self.check_write("update_seat_rect")?;
        let mut tables = self.tables.write();
        let seat = tables
            .seats
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(BackendError::SeatNotFound(id))?;
        seat.set_rect(rect);
        tracing::debug!("Seat {} placed at {}", id, rect);
        Ok(seat.clone())
    }

    async fn fetch_reservations(&self, date: NaiveDate) -> BackendResult<Vec<Reservation>> {
        Ok(self
            .tables
            .read()
            .reservations
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn create_reservations(
        &self,
        request: ReservationRequest,
    ) -> BackendResult<Vec<Reservation>> {
        if request.seat_ids.is_empty() {
            return Err(BackendError::InvalidRequest {
                reason: "no seats in reservation request".to_string(),
            });
        }
        self.check_write("create_reservations")?;

        let mut tables = self.tables.write();
        for seat_id in &request.seat_ids {
            if !tables.seats.iter().any(|s| s.id == *seat_id) {
                return Err(BackendError::SeatNotFound(*seat_id));
            }
            let taken = tables
                .reservations
                .iter()
                .any(|r| r.seat_id == *seat_id && r.date == request.date);
            if taken {
                return Err(BackendError::InvalidRequest {
                    reason: format!("seat {} is already reserved on {}", seat_id, request.date),
                });
            }
        }

        let mut next_id = tables.reservations.iter().map(|r| r.id.0).max().unwrap_or(0);
        let created: Vec<Reservation> = request
            .seat_ids
            .iter()
            .map(|seat_id| {
                next_id += 1;
                Reservation {
                    id: ReservationId(next_id),
                    seat_id: *seat_id,
                    date: request.date,
                    name: request.name.clone(),
                    department: request.department.clone(),
                }
            })
            .collect();
        tables.reservations.extend(created.iter().cloned());
        tracing::debug!("Created {} reservation(s) for {}", created.len(), request.date);
        Ok(created)
    }

    /// Cancelling a seat that has no reservation on `date` succeeds and
    /// changes nothing.
    async fn cancel_reservation(&self, seat_id: SeatId, date: NaiveDate) -> BackendResult<()> {
        self.check_write("cancel_reservation")?;
        self.tables
            .write()
            .reservations
            .retain(|r| !(r.seat_id == seat_id && r.date == date));
        Ok(())
    }

    async fn reservation_detail(
        &self,
        seat_id: SeatId,
        date: NaiveDate,
    ) -> BackendResult<Option<Reservation>> {
        Ok(self
            .tables
            .read()
            .reservations
            .iter()
            .find(|r| r.seat_id == seat_id && r.date == date)
            .cloned())
    }

    async fn fetch_overlays(&self) -> BackendResult<Vec<InfoOverlay>> {
        Ok(self.tables.read().overlays.clone())
    }

    async fn add_overlay(&self, name: &str, rect: Rectangle) -> BackendResult<InfoOverlay> {
        if name.is_empty() {
            return Err(BackendError::InvalidRequest {
                reason: "overlay name is empty".to_string(),
            });
        }
        self.check_write("add_overlay")?;
        let mut tables = self.tables.write();
        let next_id = tables.overlays.iter().map(|o| o.id.0).max().unwrap_or(0) + 1;
        let overlay = InfoOverlay {
            id: OverlayId(next_id),
            name: name.to_string(),
            rect,
        };
        tables.overlays.push(overlay.clone());
        Ok(overlay)
    }

    async fn remove_overlay(&self, id: OverlayId) -> BackendResult<()> {
        self.check_write("remove_overlay")?;
        let mut tables = self.tables.write();
        let before = tables.overlays.len();
        tables.overlays.retain(|o| o.id != id);
        if tables.overlays.len() == before {
            return Err(BackendError::OverlayNotFound(id));
        }
        Ok(())
    }
}
