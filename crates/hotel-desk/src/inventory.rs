//! Implementation of the room inventory store
//!
//! The inventory is the single source of truth for occupancy. Its outer
//! structure (the set of room types and the rooms under each) is fixed at
//! startup; only the per-room booking state mutates afterwards, and only
//! under the owning bucket's lock.

use chrono::NaiveDate;
use parking_lot::{Mutex, MutexGuard};

use crate::error::BookingError;

/// A category of rooms with a fixed nightly rate and numbering range
#[derive(Clone, Copy, Debug)]
pub struct RoomType {
    /// Name the clients book by, e.g. `single_bed`
    pub name: &'static str,
    /// Offset from which this type's room numbers are generated
    pub number_base: u32,
    /// Price per night in whole currency units
    pub nightly_rate: u32,
}

/// An active booking: guest and check-in date always travel together
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    /// Name of the occupying guest
    pub guest: String,
    /// Date the guest checked in
    pub checkin: NaiveDate,
}

/// One bookable unit
#[derive(Debug)]
pub struct Room {
    number: u32,
    booking: Option<Booking>,
}

impl Room {
    fn new(number: u32) -> Self {
        Self {
            number,
            booking: None,
        }
    }

    /// The room's unique number, assigned once at creation
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Whether the room currently has no occupant
    #[inline]
    pub fn is_free(&self) -> bool {
        self.booking.is_none()
    }

    /// The current booking, if any
    #[inline]
    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    /// Mark the room as occupied.
    ///
    /// The caller must have verified the room is free while holding the
    /// bucket lock; this does not re-check.
    pub fn assign(&mut self, guest: &str, checkin: NaiveDate) {
        debug_assert!(self.booking.is_none());
        self.booking = Some(Booking {
            guest: guest.to_string(),
            checkin,
        });
    }

    /// Mark the room as free, returning the prior booking for billing.
    pub fn release(&mut self) -> Option<Booking> {
        self.booking.take()
    }
}

/// All rooms of one [`RoomType`], guarded by that type's lock
///
/// Bookings of different types never conflict, so each bucket carries its
/// own mutex instead of the store serializing everything globally.
pub struct Bucket {
    room_type: RoomType,
    /// Number of rooms in the bucket; fixed, so readable without the lock
    count: u32,
    rooms: Mutex<Vec<Room>>,
}

impl Bucket {
    fn new(room_type: RoomType, count: u32) -> Self {
        let rooms = (1..=count)
            .map(|i| Room::new(room_type.number_base + i))
            .collect();
        Self {
            room_type,
            count,
            rooms: Mutex::new(rooms),
        }
    }

    /// Static attributes of the bucket's room type
    #[inline]
    pub fn room_type(&self) -> &RoomType {
        &self.room_type
    }

    /// Lock the bucket's rooms for a check-then-mutate critical section
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, Vec<Room>> {
        self.rooms.lock()
    }

    /// Whether `number` falls in this bucket's numbering range
    pub fn contains(&self, number: u32) -> bool {
        let base = self.room_type.number_base;
        number > base && number <= base + self.count
    }

    /// Count of rooms of this type with no occupant
    pub fn free_count(&self) -> u32 {
        self.rooms.lock().iter().filter(|r| r.is_free()).count() as u32
    }
}

/// The authoritative collection of all rooms and their occupancy
pub struct Inventory {
    buckets: Vec<Bucket>,
}

/// Room types offered by the service, fixed at startup
fn default_room_types() -> Vec<RoomType> {
    vec![
        RoomType {
            name: "single_bed",
            number_base: 100,
            nightly_rate: 50,
        },
        RoomType {
            name: "double_bed",
            number_base: 200,
            nightly_rate: 100,
        },
        RoomType {
            name: "suite",
            number_base: 300,
            nightly_rate: 200,
        },
    ]
}

impl Inventory {
    /// Create the default inventory with `rooms_per_type` rooms of each type.
    pub fn new(rooms_per_type: u32) -> Self {
        Self::with_types(default_room_types(), rooms_per_type)
    }

    /// Create an inventory over a custom room type table.
    ///
    /// Panics if the numbering ranges of two types overlap: room numbers
    /// must stay globally unique.
    pub fn with_types(types: Vec<RoomType>, rooms_per_type: u32) -> Self {
        for (i, a) in types.iter().enumerate() {
            for b in &types[i + 1..] {
                let disjoint = a.number_base + rooms_per_type <= b.number_base
                    || b.number_base + rooms_per_type <= a.number_base;
                assert!(
                    disjoint,
                    "room number ranges of {} and {} overlap",
                    a.name, b.name
                );
            }
        }

        let buckets = types
            .into_iter()
            .map(|t| Bucket::new(t, rooms_per_type))
            .collect();
        Self { buckets }
    }

    /// Iterate the buckets in declaration order
    #[inline]
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// Look a bucket up by room type name
    pub fn bucket(&self, room_type: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.room_type.name == room_type)
    }

    /// Find the bucket whose numbering range contains `number`
    pub fn bucket_for_room(&self, number: u32) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.contains(number))
    }

    /// Count of free rooms of the given type
    pub fn available(&self, room_type: &str) -> Result<u32, BookingError> {
        self.bucket(room_type)
            .map(Bucket::free_count)
            .ok_or_else(|| BookingError::UnknownRoomType(room_type.to_string()))
    }
}
