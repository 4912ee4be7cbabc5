//! Data models for seats, reservations, information overlays and the
//! registration mode.
//!
//! This module provides:
//! - Strongly typed identifiers (seat, reservation, overlay, pending overlay)
//! - The externally issued `Seat` record with optional coordinates
//! - Reservations for a given calendar date
//! - Named information overlays drawn on the map
//! - The mutually exclusive registration `Mode`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::geometry::Rectangle;

/// Identifier of a seat, issued by the backend and stable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u32);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted information overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locally generated identifier for an overlay that has not been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingOverlayId(Uuid);

impl PendingOverlayId {
    /// Creates a new unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PendingOverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PendingOverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tmp-{}", &self.0.to_string()[..8])
    }
}

/// A seat as stored by the backend.
///
/// Coordinates are optional: a seat with any of them missing has not been
/// placed on the map yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub name: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Seat {
    /// Creates an unplaced seat.
    pub fn unplaced(id: SeatId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    /// Creates a seat already placed at `rect`.
    pub fn placed(id: SeatId, name: impl Into<String>, rect: Rectangle) -> Self {
        let mut seat = Self::unplaced(id, name);
        seat.set_rect(rect);
        seat
    }

    /// Persisted rectangle, present only when all four coordinates are set.
    pub fn rect(&self) -> Option<Rectangle> {
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Rectangle::from_origin_size(x, y, w, h),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.rect().is_some()
    }

    pub fn set_rect(&mut self, rect: Rectangle) {
        self.x = Some(rect.x());
        self.y = Some(rect.y());
        self.width = Some(rect.width());
        self.height = Some(rect.height());
    }
}

/// A reservation of one seat on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub seat_id: SeatId,
    pub date: NaiveDate,
    pub name: String,
    pub department: String,
}

/// Request to reserve several seats for one person on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub seat_ids: Vec<SeatId>,
    pub date: NaiveDate,
    pub name: String,
    pub department: String,
}

/// A named region drawn on top of the map (e.g. a meeting area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoOverlay {
    pub id: OverlayId,
    pub name: String,
    pub rect: Rectangle,
}

/// The single active registration workflow, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Normal booking; map navigation enabled.
    #[default]
    Idle,
    /// Assigning rectangles to seats.
    SeatRegistration,
    /// Drawing named information overlays.
    OverlayRegistration,
}

impl Mode {
    /// True for either registration mode.
    pub fn is_registration(&self) -> bool {
        !matches!(self, Mode::Idle)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => write!(f, "Idle"),
            Mode::SeatRegistration => write!(f, "Seat registration"),
            Mode::OverlayRegistration => write!(f, "Overlay registration"),
        }
    }
}

/// Which pending collection a commit or discard refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationKind {
    Seats,
    Overlays,
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationKind::Seats => write!(f, "seats"),
            RegistrationKind::Overlays => write!(f, "overlays"),
        }
    }
}
