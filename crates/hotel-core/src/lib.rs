//! 🏗 Infrastructure for handling requests, etc.
#![warn(missing_docs)]

mod request;

pub use request::{RawRequest, Request, RequestHandler, RequestKind, RequestMethod};

/// Configuration of the reservation system
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of rooms created per room type at startup
    pub rooms_per_type: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { rooms_per_type: 10 }
    }
}
