//! Pointer and keyboard input in container pixel coordinates.

use serde::{Deserialize, Serialize};

/// Bit of `buttons` set while the primary (left) button is down.
pub const PRIMARY_BUTTON: u16 = 1;

/// Pixels moved per arrow key press.
pub const KEYBOARD_PAN_STEP: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (e.g. a touch was interrupted).
    Cancel,
    /// The pointer left the map container.
    Leave,
}

/// A pointer event over the map container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Bitmask of the buttons held during the event.
    pub buttons: u16,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64, buttons: u16) -> Self {
        Self {
            kind,
            x,
            y,
            buttons,
        }
    }

    /// Primary button pressed at `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y, PRIMARY_BUTTON)
    }

    /// Move with the primary button held.
    pub fn drag_to(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y, PRIMARY_BUTTON)
    }

    /// Move with no button held.
    pub fn hover(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y, 0)
    }

    /// Primary button released at `(x, y)`.
    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y, 0)
    }

    pub fn cancel() -> Self {
        Self::new(PointerKind::Cancel, 0.0, 0.0, 0)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Leave, x, y, 0)
    }

    /// True while the primary button is part of `buttons`.
    pub fn is_primary_held(&self) -> bool {
        self.buttons & PRIMARY_BUTTON == PRIMARY_BUTTON
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Navigation keys handled by the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKey {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
}

impl NavigationKey {
    /// Screen delta by which the content moves, for arrow keys.
    pub fn pan_delta(&self) -> Option<(f64, f64)> {
        match self {
            // Arrow up reveals what is above, so the content moves down.
            NavigationKey::Up => Some((0.0, KEYBOARD_PAN_STEP)),
            NavigationKey::Down => Some((0.0, -KEYBOARD_PAN_STEP)),
            NavigationKey::Left => Some((KEYBOARD_PAN_STEP, 0.0)),
            NavigationKey::Right => Some((-KEYBOARD_PAN_STEP, 0.0)),
            NavigationKey::ZoomIn | NavigationKey::ZoomOut => None,
        }
    }
}
