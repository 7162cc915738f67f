//! 🛎 Room inventory and booking engine of the reservation system
//!
//! The crate is split into the [inventory] store (which owns all occupancy
//! state), the booking [engine] (which runs the three reservation
//! operations under the per-type locks), and the [front desk][desk] (which
//! dispatches decoded requests onto the engine). The surrounding transport
//! only ever talks to the [`FrontDesk`].

#![warn(missing_docs)]
#![allow(rustdoc::private_intra_doc_links)]

use hotel_core::Config;

mod desk;
mod engine;
mod error;
mod inventory;

pub use desk::FrontDesk;
pub use engine::{BookingEngine, Receipt};
pub use error::BookingError;
pub use inventory::{Booking, Bucket, Inventory, Room, RoomType};

/// Entrypoint of the reservation system
///
/// Constructs a front desk over a fresh inventory; the surrounding
/// infrastructure serves it requests, possibly from many threads at once.
pub fn launch(config: &Config) -> FrontDesk {
    FrontDesk::new(BookingEngine::new(Inventory::new(config.rooms_per_type)))
}
