//! # SeatKit Core
//!
//! Core types, geometry and the persistence port for SeatKit.
//! Provides the data model shared by the seat map, the backend and the
//! settings crates, plus the error taxonomy and the event bus.

pub mod backend;
pub mod constants;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod geometry;

pub use backend::ReservationBackend;

pub use data::{
    InfoOverlay, Mode, OverlayId, PendingOverlayId, RegistrationKind, Reservation, ReservationId,
    ReservationRequest, Seat, SeatId,
};

pub use error::{
    BackendError, BackendResult, BookingError, CommitError, Error, RegistrationError, Result,
};

pub use event_bus::{
    AppEvent, BookingEvent, ErrorEvent, EventBus, EventBusConfig, EventCategory, EventFilter,
    NavigationEvent, RegistrationEvent, SubscriptionId,
};

pub use geometry::{rectangle_from_points, Point, Rectangle};
