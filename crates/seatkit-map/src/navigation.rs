//! Map navigation controls and their coupling to the registration mode.
//!
//! While a registration mode is active every native pan/zoom gesture is
//! switched off so pointer drags draw rectangles instead of moving the map.
//! The suppression flag is derived from the mode alone.

use serde::{Deserialize, Serialize};

use seatkit_core::Mode;

/// Native map gestures that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// Panning by dragging with the pointer.
    Dragging,
    /// Zooming with the mouse wheel.
    ScrollWheelZoom,
    /// Zooming in with a double click.
    DoubleClickZoom,
    /// Pinch zoom on touch screens.
    TouchZoom,
    /// Arrow keys and +/- keys.
    Keyboard,
}

/// Enabled state of each native gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationControls {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub touch_zoom: bool,
    pub keyboard: bool,
}

impl NavigationControls {
    /// All gestures enabled.
    pub fn enabled() -> Self {
        Self::uniform(true)
    }

    /// All gestures disabled.
    pub fn disabled() -> Self {
        Self::uniform(false)
    }

    fn uniform(on: bool) -> Self {
        Self {
            dragging: on,
            scroll_wheel_zoom: on,
            double_click_zoom: on,
            touch_zoom: on,
            keyboard: on,
        }
    }

    pub fn allows(&self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::Dragging => self.dragging,
            Gesture::ScrollWheelZoom => self.scroll_wheel_zoom,
            Gesture::DoubleClickZoom => self.double_click_zoom,
            Gesture::TouchZoom => self.touch_zoom,
            Gesture::Keyboard => self.keyboard,
        }
    }

    /// True when no gesture is enabled.
    pub fn all_disabled(&self) -> bool {
        *self == Self::disabled()
    }
}

impl Default for NavigationControls {
    fn default() -> Self {
        Self::enabled()
    }
}

/// Whether native navigation must be off for `mode`.
pub fn navigation_suppressed(mode: Mode) -> bool {
    mode != Mode::Idle
}

/// Something whose native navigation can be switched as a whole.
pub trait MapNavigation {
    /// Enables or disables every native gesture.
    fn set_navigation_enabled(&mut self, enabled: bool);
}

impl MapNavigation for NavigationControls {
    fn set_navigation_enabled(&mut self, enabled: bool) {
        *self = Self::uniform(enabled);
    }
}

/// Applies the derived suppression flag to a navigation target.
///
/// The target is only touched when the derived value differs from the last
/// value applied.
#[derive(Debug, Clone, Default)]
pub struct NavigationSync {
    applied: Option<bool>,
}

impl NavigationSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last suppression value pushed to the target, if any.
    pub fn applied(&self) -> Option<bool> {
        self.applied
    }

    /// Brings `target` in line with `mode`.
    ///
    /// Returns the new suppression flag when it changed.
    pub fn sync(&mut self, mode: Mode, target: &mut dyn MapNavigation) -> Option<bool> {
        let suppressed = navigation_suppressed(mode);
        if self.applied == Some(suppressed) {
            return None;
        }
        target.set_navigation_enabled(!suppressed);
        self.applied = Some(suppressed);
        tracing::debug!(
            "Map navigation {} for {} mode",
            if suppressed { "suppressed" } else { "restored" },
            mode
        );
        Some(suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTarget {
        calls: Vec<bool>,
    }

    impl MapNavigation for CountingTarget {
        fn set_navigation_enabled(&mut self, enabled: bool) {
            self.calls.push(enabled);
        }
    }

    #[test]
    fn test_suppressed_exactly_outside_idle() {
        assert!(!navigation_suppressed(Mode::Idle));
        assert!(navigation_suppressed(Mode::SeatRegistration));
        assert!(navigation_suppressed(Mode::OverlayRegistration));
    }

    #[test]
    fn test_controls_switch_together() {
        let mut controls = NavigationControls::default();
        assert!(controls.allows(Gesture::Keyboard));

        controls.set_navigation_enabled(false);
        assert!(controls.all_disabled());
        assert!(!controls.allows(Gesture::Dragging));
        assert!(!controls.allows(Gesture::TouchZoom));

        controls.set_navigation_enabled(true);
        assert_eq!(controls, NavigationControls::enabled());
    }

    #[test]
    fn test_sync_only_applies_changes() {
        let mut sync = NavigationSync::new();
        let mut target = CountingTarget::default();

        assert_eq!(sync.sync(Mode::Idle, &mut target), Some(false));
        assert_eq!(sync.sync(Mode::Idle, &mut target), None);
        assert_eq!(sync.sync(Mode::SeatRegistration, &mut target), Some(true));
        // Switching between registration modes keeps navigation off.
        assert_eq!(sync.sync(Mode::OverlayRegistration, &mut target), None);
        assert_eq!(sync.sync(Mode::Idle, &mut target), Some(false));

        assert_eq!(target.calls, vec![true, false, true]);
    }
}
