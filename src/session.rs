//! Application session: one backend, one seat map and one booking view
//! wired to a shared event bus.

use serde::Serialize;
use std::sync::Arc;

use seatkit_core::{EventBus, Mode, ReservationBackend, Result, SeatId};
use seatkit_map::{
    BookingSession, MapScene, ModeCoordinator, SeatClick, SeatMap, SeatPalette, SeatStatus,
};
use seatkit_settings::Config;

/// Counts reported after startup and on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub date: String,
    pub mode: String,
    pub seats: usize,
    pub placed_seats: usize,
    pub pending_seats: usize,
    pub overlays: usize,
    pub pending_overlays: usize,
    pub reservations: usize,
    pub selected: usize,
}

pub struct Session {
    backend: Arc<dyn ReservationBackend>,
    events: Arc<EventBus>,
    map: SeatMap,
    booking: BookingSession,
    palette: SeatPalette,
}

impl Session {
    /// Builds the map and booking view from `config` and loads seats,
    /// overlays and the default date's reservations.
    pub async fn start(
        config: &Config,
        backend: Arc<dyn ReservationBackend>,
        events: Arc<EventBus>,
    ) -> Result<Self> {
        let mut coordinator = ModeCoordinator::new().with_policy(config.registration);
        coordinator.load(backend.as_ref()).await?;

        let viewport = config.viewport(config.map.width, config.map.height);
        let map = SeatMap::new(viewport, coordinator).with_event_bus(events.clone());

        let mut booking =
            BookingSession::new(config.booking.default_date).with_event_bus(events.clone());
        booking.load(backend.as_ref()).await?;

        tracing::info!(
            "Session started: {} seat(s), {} overlay(s), date {}",
            map.coordinator().seats().len(),
            map.coordinator().overlays().len(),
            booking.date()
        );

        Ok(Self {
            backend,
            events,
            map,
            booking,
            palette: config.palette.clone(),
        })
    }

    pub fn backend(&self) -> &dyn ReservationBackend {
        self.backend.as_ref()
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn map(&self) -> &SeatMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut SeatMap {
        &mut self.map
    }

    pub fn booking(&self) -> &BookingSession {
        &self.booking
    }

    pub fn booking_mut(&mut self) -> &mut BookingSession {
        &mut self.booking
    }

    pub fn mode(&self) -> Mode {
        self.map.mode()
    }

    /// Seat click routed with the map's current mode.
    pub async fn click_seat(&mut self, seat_id: SeatId) -> Result<SeatClick> {
        let mode = self.map.mode();
        self.booking
            .click_seat(seat_id, mode, self.backend.as_ref())
            .await
    }

    pub async fn confirm_seat_registration(&mut self) -> Result<usize> {
        self.map
            .confirm_seat_registration(self.backend.as_ref())
            .await
    }

    pub async fn confirm_overlay_registration(&mut self) -> Result<usize> {
        self.map
            .confirm_overlay_registration(self.backend.as_ref())
            .await
    }

    pub fn scene(&self) -> MapScene {
        self.map.scene(
            self.booking.reservations(),
            self.booking.selection(),
            &self.palette,
        )
    }

    pub fn summary(&self) -> SessionSummary {
        let coordinator = self.map.coordinator();
        let placed_seats = coordinator
            .roster()
            .iter()
            .filter(|e| e.status == SeatStatus::Registered)
            .count();
        SessionSummary {
            date: self.booking.date().to_string(),
            mode: self.map.mode().to_string(),
            seats: coordinator.seats().len(),
            placed_seats,
            pending_seats: coordinator.pending_seats().len(),
            overlays: coordinator.overlays().len(),
            pending_overlays: coordinator.pending_overlays().len(),
            reservations: self.booking.reservations().len(),
            selected: self.booking.selection().len(),
        }
    }
}
