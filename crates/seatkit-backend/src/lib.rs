//! In-memory implementation of the SeatKit reservation backend.
//!
//! Stands in for a real service: seats, reservations and overlays live in
//! plain vectors behind a lock, ids are assigned as max + 1.

pub mod memory;

pub use memory::{InMemoryBackend, Tables};
