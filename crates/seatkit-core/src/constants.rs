//! Shared constants for the seat map and the in-memory backend.

/// Width of the seat-map image in world units.
pub const MAP_WIDTH: f64 = 800.0;

/// Height of the seat-map image in world units.
pub const MAP_HEIGHT: f64 = 600.0;

/// Path of the floor-plan image displayed under the seats.
pub const BACKGROUND_IMAGE_URL: &str = "/images/seatmap.png";

/// Zoom level the map opens at.
pub const INITIAL_ZOOM: f64 = 1.0;

/// Most zoomed-out level the map allows.
pub const MIN_ZOOM: f64 = -1.0;

/// Most zoomed-in level the map allows.
pub const MAX_ZOOM: f64 = 4.0;

/// Number of seats the in-memory backend is seeded with.
pub const DEFAULT_SEAT_COUNT: u32 = 74;

/// Date selected when the application starts.
pub const DEFAULT_RESERVATION_DATE: &str = "2024-12-31";

/// Label suffix for seats and overlays that are not persisted yet.
pub const UNCONFIRMED_TAG: &str = "(unconfirmed)";

/// Label suffix for seats in the current booking selection.
pub const SELECTED_TAG: &str = "(selected)";
