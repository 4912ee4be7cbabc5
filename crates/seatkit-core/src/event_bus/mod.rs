//! # Event Bus Module
//!
//! Publish/subscribe hub decoupling the seat map from its presentation
//! adapters. The mode coordinator, canvas and booking workflow publish
//! typed events; adapters subscribe by category.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seatkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::shared();
//! let id = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Registration]),
//!     |event| tracing::info!("{}", event.description()),
//! );
//! bus.unsubscribe(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
