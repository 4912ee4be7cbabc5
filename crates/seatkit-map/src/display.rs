//! Display resolution for seats and overlays.
//!
//! Decides which rectangle each seat is drawn with (a pending rectangle
//! overrides the persisted one), what fill and label it gets, and collects
//! everything into a [`MapScene`] in draw order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use seatkit_core::constants::{SELECTED_TAG, UNCONFIRMED_TAG};
use seatkit_core::{OverlayId, PendingOverlayId, Rectangle, Reservation, Seat, SeatId};

use crate::coordinator::ModeCoordinator;

/// Fill and stroke colors, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatPalette {
    pub reserved: String,
    pub selected: String,
    pub pending: String,
    pub plain: String,
    pub overlay: String,
    pub pending_overlay: String,
    /// Outline of the rectangle being dragged.
    pub candidate_stroke: String,
}

impl Default for SeatPalette {
    fn default() -> Self {
        Self {
            reserved: "#ff9999".to_string(),
            selected: "#99ff99".to_string(),
            pending: "#ffe699".to_string(),
            plain: "transparent".to_string(),
            overlay: "rgba(255,255,0,0.3)".to_string(),
            pending_overlay: "rgba(0,255,255,0.3)".to_string(),
            candidate_stroke: "blue".to_string(),
        }
    }
}

/// Rectangle a seat is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRect {
    pub rect: Rectangle,
    /// True when the rectangle is not persisted yet.
    pub is_pending: bool,
}

/// Pending rectangle if there is one, then persisted coordinates, else nothing.
pub fn resolve_seat_rect(
    seat: &Seat,
    pending: &BTreeMap<SeatId, Rectangle>,
) -> Option<ResolvedRect> {
    if let Some(rect) = pending.get(&seat.id) {
        return Some(ResolvedRect {
            rect: *rect,
            is_pending: true,
        });
    }
    seat.rect().map(|rect| ResolvedRect {
        rect,
        is_pending: false,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatState {
    Reserved,
    Selected,
    Pending,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAppearance {
    pub state: SeatState,
    pub fill: String,
    pub label: String,
}

/// Fill and label for a seat.
///
/// Fill precedence is reserved, selected, pending, plain. The label appends
/// the reserver's name, else the unconfirmed tag, else the selected tag.
pub fn resolve_seat_appearance(
    seat: &Seat,
    reservations: &[Reservation],
    selection: &BTreeSet<SeatId>,
    is_pending: bool,
    palette: &SeatPalette,
) -> SeatAppearance {
    let reservation = reservations.iter().find(|r| r.seat_id == seat.id);
    let selected = selection.contains(&seat.id);

    let (state, fill) = if reservation.is_some() {
        (SeatState::Reserved, &palette.reserved)
    } else if selected {
        (SeatState::Selected, &palette.selected)
    } else if is_pending {
        (SeatState::Pending, &palette.pending)
    } else {
        (SeatState::Plain, &palette.plain)
    };

    let suffix = match reservation {
        Some(r) => Some(r.name.as_str()),
        None if is_pending => Some(UNCONFIRMED_TAG),
        None if selected => Some(SELECTED_TAG),
        None => None,
    };
    let label = match suffix {
        Some(suffix) => format!("{}\n{}", seat.name, suffix),
        None => seat.name.clone(),
    };

    SeatAppearance {
        state,
        fill: fill.clone(),
        label,
    }
}

/// A seat ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat_id: SeatId,
    pub rect: Rectangle,
    pub is_pending: bool,
    pub appearance: SeatAppearance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKey {
    Persisted(OverlayId),
    Pending(PendingOverlayId),
}

/// An overlay ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    pub key: OverlayKey,
    pub rect: Rectangle,
    pub fill: String,
    pub label: String,
}

/// Label of a draft overlay.
pub fn pending_overlay_label(name: &str) -> String {
    if name.is_empty() {
        UNCONFIRMED_TAG.to_string()
    } else {
        format!("{}\n{}", name, UNCONFIRMED_TAG)
    }
}

/// The dashed outline of the drag in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateView {
    pub rect: Rectangle,
    pub stroke: String,
}

/// Everything to draw, bottom layer first: overlays, drafts, seats,
/// then the drag candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    pub overlays: Vec<OverlayView>,
    pub pending_overlays: Vec<OverlayView>,
    pub seats: Vec<SeatView>,
    pub candidate: Option<CandidateView>,
}

impl MapScene {
    pub fn build(
        coordinator: &ModeCoordinator,
        candidate: Option<Rectangle>,
        reservations: &[Reservation],
        selection: &BTreeSet<SeatId>,
        palette: &SeatPalette,
    ) -> Self {
        let overlays = coordinator
            .overlays()
            .iter()
            .map(|o| OverlayView {
                key: OverlayKey::Persisted(o.id),
                rect: o.rect,
                fill: palette.overlay.clone(),
                label: o.name.clone(),
            })
            .collect();

        let pending_overlays = coordinator
            .pending_overlays()
            .iter()
            .map(|o| OverlayView {
                key: OverlayKey::Pending(o.temp_id),
                rect: o.rect,
                fill: palette.pending_overlay.clone(),
                label: pending_overlay_label(&o.name),
            })
            .collect();

        let seats = coordinator
            .seats()
            .iter()
            .filter_map(|seat| {
                let resolved = resolve_seat_rect(seat, coordinator.pending_seats())?;
                Some(SeatView {
                    seat_id: seat.id,
                    rect: resolved.rect,
                    is_pending: resolved.is_pending,
                    appearance: resolve_seat_appearance(
                        seat,
                        reservations,
                        selection,
                        resolved.is_pending,
                        palette,
                    ),
                })
            })
            .collect();

        Self {
            overlays,
            pending_overlays,
            seats,
            candidate: candidate.map(|rect| CandidateView {
                rect,
                stroke: palette.candidate_stroke.clone(),
            }),
        }
    }

    /// Topmost seat under a world point.
    pub fn seat_at(&self, x: f64, y: f64) -> Option<SeatId> {
        let point = seatkit_core::Point::new(x, y);
        self.seats
            .iter()
            .rev()
            .find(|s| s.rect.contains(point))
            .map(|s| s.seat_id)
    }
}
