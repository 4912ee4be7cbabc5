//! # SeatKit Map
//!
//! Interactive seat map for SeatKit: turning pointer drags into seat and
//! overlay rectangles, keeping the registration modes exclusive, and
//! resolving what each seat looks like for the viewed date.
//!
//! ## Architecture
//!
//! ```text
//! SeatMap (canvas)
//!   ├── Viewport (pan/zoom, pixel <-> world)
//!   ├── NavigationControls + NavigationSync (off while registering)
//!   ├── DragGesture (press/move/release -> rectangle)
//!   └── ModeCoordinator (mode, targeted seat, pending rectangles)
//!         └── commits through ReservationBackend
//!
//! BookingSession (date, selection, reservation form and detail)
//! MapScene (display resolution, draw order)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seatkit_map::{PointerEvent, SeatMap};
//!
//! let mut map = SeatMap::default();
//! map.enter_seat_registration()?;
//! map.select_seat_for_registration(SeatId(5))?;
//! map.handle_pointer(PointerEvent::down(10.0, 10.0));
//! map.handle_pointer(PointerEvent::drag_to(50.0, 40.0));
//! map.handle_pointer(PointerEvent::up(50.0, 40.0));
//! map.confirm_seat_registration(&backend).await?;
//! ```

pub mod booking;
pub mod canvas;
pub mod coordinator;
pub mod display;
pub mod drag;
pub mod input;
pub mod navigation;
pub mod viewport;

pub use booking::{BookingDialog, BookingSession, ReservationForm, SeatClick};
pub use canvas::{PointerOutcome, SeatMap};
pub use coordinator::{
    CommitOutcome, ModeCoordinator, OverlayCommit, OverlayCommitOutcome, PendingOverlay,
    RegistrationPolicy, RosterEntry, SeatCommit, SeatCommitOutcome, SeatStatus,
};
pub use display::{
    pending_overlay_label, resolve_seat_appearance, resolve_seat_rect, CandidateView, MapScene,
    OverlayKey, OverlayView, ResolvedRect, SeatAppearance, SeatPalette, SeatState, SeatView,
};
pub use drag::{drag_eligible, DragGesture, DragState};
pub use input::{NavigationKey, PointerEvent, PointerKind, PRIMARY_BUTTON};
pub use navigation::{
    navigation_suppressed, Gesture, MapNavigation, NavigationControls, NavigationSync,
};
pub use viewport::Viewport;
