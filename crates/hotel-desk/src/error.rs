//! Error taxonomy of the booking engine
//!
//! All variants are recoverable, caller-facing failures; none of them is
//! fatal to the service.

/// Failure of a booking engine operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The requested room type is not part of the inventory
    #[error("invalid room type: {0}")]
    InvalidRoomType(String),

    /// A date did not parse as `YYYY-MM-DD`
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A field failed basic validation, e.g. an empty customer name
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// All rooms of the requested type are occupied
    #[error("no {0} rooms available")]
    NoAvailability(String),

    /// No room with the given number exists in the inventory
    #[error("room {0} not found")]
    RoomNotFound(u32),

    /// The room exists but currently has no occupant
    #[error("room {0} is not occupied")]
    RoomNotOccupied(u32),

    /// The checkout date is on or before the check-in date
    #[error("checkout date must be after the check-in date")]
    InvalidDateRange,

    /// Store-level lookup of a room type that is not in the fixed set
    ///
    /// Unreachable through the engine, which validates the type name first;
    /// reported as an internal fault if it ever surfaces.
    #[error("unknown room type: {0}")]
    UnknownRoomType(String),
}
