//! # SeatKit
//!
//! Seat reservation map: seats and informational overlays are drawn as
//! rectangles over a floor-plan image, registered by dragging on the map,
//! and reserved per date.
//!
//! ## Architecture
//!
//! SeatKit is organized as a workspace with multiple crates:
//!
//! 1. **seatkit-core** - Data model, geometry, errors, events and the backend port
//! 2. **seatkit-backend** - In-memory reservation backend
//! 3. **seatkit-map** - Viewport, navigation suppression, drag gesture,
//!    registration modes, display resolution and the booking workflow
//! 4. **seatkit-settings** - Configuration files and the config directory
//! 5. **seatkit** - Session wiring and the headless binary

pub mod session;

pub use seatkit_backend::InMemoryBackend;
pub use seatkit_core::{
    rectangle_from_points, AppEvent, BackendError, BookingError, CommitError, Error, EventBus,
    InfoOverlay, Mode, Point, Rectangle, RegistrationError, Reservation, ReservationBackend,
    Result, Seat, SeatId,
};
pub use seatkit_map::{
    BookingSession, MapScene, ModeCoordinator, PointerEvent, PointerOutcome, SeatMap, SeatPalette,
    Viewport,
};
pub use seatkit_settings::{Config, SettingsManager};
pub use session::{Session, SessionSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("SEATKIT_BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support (INFO when unset)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
