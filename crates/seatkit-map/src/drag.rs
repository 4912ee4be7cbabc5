//! Drag-to-rectangle gesture.
//!
//! A press starts a drag only when the registration state allows it. Every
//! move with the primary button held recomputes the candidate rectangle from
//! the start point and the current point; the release hands the candidate
//! back and returns to idle.

use seatkit_core::{rectangle_from_points, Mode, Point, Rectangle};

/// State of the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: Point,
        /// None until the first move after the press.
        candidate: Option<Rectangle>,
    },
}

/// Whether a drag may start in this state.
///
/// Seat registration needs a targeted seat, overlay registration needs
/// nothing else, idle never draws.
pub fn drag_eligible(mode: Mode, seat_targeted: bool) -> bool {
    match mode {
        Mode::Idle => false,
        Mode::SeatRegistration => seat_targeted,
        Mode::OverlayRegistration => true,
    }
}

/// Rectangle drag gesture state machine.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Rectangle to draw as the dashed preview, if any.
    pub fn candidate(&self) -> Option<Rectangle> {
        match self.state {
            DragState::Dragging { candidate, .. } => candidate,
            DragState::Idle => None,
        }
    }

    /// Pointer pressed at `point`. Returns true if a drag started.
    pub fn press(&mut self, point: Point, eligible: bool) -> bool {
        if !eligible {
            return false;
        }
        self.state = DragState::Dragging {
            start: point,
            candidate: None,
        };
        tracing::debug!("Drag started at {}", point);
        true
    }

    /// Pointer moved to `point`.
    ///
    /// Ignored unless dragging with the primary button held. Returns the
    /// recomputed candidate.
    pub fn motion(&mut self, point: Point, primary_held: bool) -> Option<Rectangle> {
        if !primary_held {
            return None;
        }
        match &mut self.state {
            DragState::Dragging { start, candidate } => {
                let rect = rectangle_from_points(*start, point);
                *candidate = Some(rect);
                Some(rect)
            }
            DragState::Idle => None,
        }
    }

    /// Pointer released. Returns the finalized rectangle, if one was drawn.
    ///
    /// The gesture is idle afterwards whether or not a rectangle came out.
    pub fn release(&mut self) -> Option<Rectangle> {
        let finalized = self.candidate();
        self.state = DragState::Idle;
        if let Some(rect) = finalized {
            tracing::debug!("Drag finalized: {}", rect);
        }
        finalized
    }

    /// Drops an in-progress drag without finalizing it.
    ///
    /// Returns true if a drag was in progress.
    pub fn abort(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        if was_dragging {
            tracing::debug!("Drag aborted");
        }
        was_dragging
    }
}
