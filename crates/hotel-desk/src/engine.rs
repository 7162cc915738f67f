//! Implementation of the booking engine
//!
//! The engine runs the three reservation operations against the inventory.
//! Validation always precedes mutation, and every check-then-mutate step on
//! a room runs inside the owning bucket's lock, so a failed operation never
//! leaves a room half-booked.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;

use crate::error::BookingError;
use crate::inventory::Inventory;

/// The bill produced by a checkout; derived, never stored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Whole nights between check-in and checkout, always at least one
    pub nights: u32,
    /// `nights` times the room type's nightly rate
    pub total: u64,
}

/// The booking engine over a fixed [`Inventory`]
pub struct BookingEngine {
    inventory: Inventory,
}

fn parse_date(s: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| BookingError::InvalidDate(s.to_string()))
}

impl BookingEngine {
    /// Create an engine over the given inventory.
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }

    /// Free-room counts per room type, keyed by type name.
    ///
    /// Read-only; each bucket is inspected under its own lock, so counts of
    /// different types may reflect slightly different instants under
    /// concurrent bookings.
    pub fn availability(&self) -> BTreeMap<&'static str, u32> {
        self.inventory
            .buckets()
            .map(|b| (b.room_type().name, b.free_count()))
            .collect()
    }

    /// Book a free room of `room_type` for `guest`, returning its number.
    ///
    /// Which free room gets picked is not a guaranteed property: the search
    /// starts at a random slot of the bucket so that concurrent bookings do
    /// not all fight over one preferred room.
    pub fn book(
        &self,
        guest: &str,
        room_type: &str,
        checkin_date: &str,
    ) -> Result<u32, BookingError> {
        let bucket = self
            .inventory
            .bucket(room_type)
            .ok_or_else(|| BookingError::InvalidRoomType(room_type.to_string()))?;
        let checkin = parse_date(checkin_date)?;
        if guest.trim().is_empty() {
            return Err(BookingError::InvalidInput("customer name must not be empty"));
        }

        // Critical section: finding a free room and assigning it must not
        // interleave with another booking of the same type.
        let mut rooms = bucket.lock();
        let len = rooms.len();
        let start = rand::thread_rng().gen_range(0..len.max(1));
        for i in 0..len {
            let room = &mut rooms[(start + i) % len];
            if room.is_free() {
                room.assign(guest, checkin);
                let number = room.number();
                drop(rooms);

                tracing::debug!(room = number, room_type, "room booked");
                return Ok(number);
            }
        }
        Err(BookingError::NoAvailability(room_type.to_string()))
    }

    /// Check out of `room_number`, freeing the room and computing the bill.
    ///
    /// An invalid date range leaves the room occupied; the guest stays
    /// booked until a checkout with a later date succeeds.
    pub fn checkout(&self, room_number: u32, checkout_date: &str) -> Result<Receipt, BookingError> {
        let checkout = parse_date(checkout_date)?;
        let bucket = self
            .inventory
            .bucket_for_room(room_number)
            .ok_or(BookingError::RoomNotFound(room_number))?;
        let rate = bucket.room_type().nightly_rate;

        // Critical section: the occupancy check, the billing read, and the
        // release must see one consistent room state.
        let mut rooms = bucket.lock();
        let room = rooms
            .iter_mut()
            .find(|r| r.number() == room_number)
            .ok_or(BookingError::RoomNotFound(room_number))?;
        let checkin = room
            .booking()
            .map(|b| b.checkin)
            .ok_or(BookingError::RoomNotOccupied(room_number))?;

        let nights = (checkout - checkin).num_days();
        if nights <= 0 {
            return Err(BookingError::InvalidDateRange);
        }

        let booking = room.release();
        drop(rooms);

        let nights = nights as u32;
        let receipt = Receipt {
            nights,
            total: u64::from(nights) * u64::from(rate),
        };
        tracing::debug!(
            room = room_number,
            guest = booking.map(|b| b.guest).as_deref(),
            nights,
            total = receipt.total,
            "room checked out"
        );
        Ok(receipt)
    }

    /// The engine's inventory
    #[inline]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rooms_per_type: u32) -> BookingEngine {
        BookingEngine::new(Inventory::new(rooms_per_type))
    }

    #[test]
    fn booking_assigns_a_room_of_the_requested_type() {
        let engine = engine(10);
        let number = engine.book("Alice", "single_bed", "2024-01-01").unwrap();
        assert!((101..=110).contains(&number));
        assert_eq!(engine.availability()["single_bed"], 9);
    }

    #[test]
    fn booking_rejects_unknown_room_type() {
        let engine = engine(10);
        assert_eq!(
            engine.book("Alice", "penthouse", "2024-01-01"),
            Err(BookingError::InvalidRoomType("penthouse".to_string()))
        );
    }

    #[test]
    fn booking_rejects_malformed_dates() {
        let engine = engine(10);
        for date in ["01-01-2024", "2024/01/01", "2024-13-01", "yesterday", ""] {
            assert_eq!(
                engine.book("Alice", "suite", date),
                Err(BookingError::InvalidDate(date.to_string())),
                "date {date:?} must be rejected"
            );
        }
        assert_eq!(engine.availability()["suite"], 10);
    }

    #[test]
    fn booking_rejects_empty_customer_names() {
        let engine = engine(10);
        for name in ["", "   "] {
            assert!(matches!(
                engine.book(name, "suite", "2024-01-01"),
                Err(BookingError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn booking_a_full_type_reports_no_availability() {
        let engine = engine(2);
        engine.book("Alice", "suite", "2024-01-01").unwrap();
        engine.book("Bob", "suite", "2024-01-01").unwrap();
        assert_eq!(
            engine.book("Carol", "suite", "2024-01-01"),
            Err(BookingError::NoAvailability("suite".to_string()))
        );

        // Other types are untouched.
        let availability = engine.availability();
        assert_eq!(availability["suite"], 0);
        assert_eq!(availability["single_bed"], 2);
        assert_eq!(availability["double_bed"], 2);
    }

    #[test]
    fn checkout_bills_nights_times_nightly_rate() {
        let engine = engine(10);
        // single_bed has a nightly rate of 50
        let number = engine.book("Alice", "single_bed", "2024-01-01").unwrap();
        let receipt = engine.checkout(number, "2024-01-04").unwrap();
        assert_eq!(receipt, Receipt { nights: 3, total: 150 });
        assert_eq!(engine.availability()["single_bed"], 10);
    }

    #[test]
    fn checkout_on_or_before_checkin_is_rejected_and_keeps_the_room_occupied() {
        let engine = engine(10);
        let number = engine.book("Alice", "suite", "2024-01-10").unwrap();

        for date in ["2024-01-10", "2024-01-05"] {
            assert_eq!(
                engine.checkout(number, date),
                Err(BookingError::InvalidDateRange)
            );
            assert_eq!(engine.availability()["suite"], 9, "room must stay occupied");
        }

        // A later date still settles the stay.
        assert!(engine.checkout(number, "2024-01-11").is_ok());
    }

    #[test]
    fn checkout_of_an_unknown_room_is_not_found() {
        let engine = engine(10);
        assert_eq!(
            engine.checkout(999, "2024-01-04"),
            Err(BookingError::RoomNotFound(999))
        );
    }

    #[test]
    fn checkout_of_a_free_room_is_rejected() {
        let engine = engine(10);
        assert_eq!(
            engine.checkout(101, "2024-01-04"),
            Err(BookingError::RoomNotOccupied(101))
        );
    }

    #[test]
    fn checkout_rejects_malformed_dates() {
        let engine = engine(10);
        let number = engine.book("Alice", "suite", "2024-01-01").unwrap();
        assert_eq!(
            engine.checkout(number, "not-a-date"),
            Err(BookingError::InvalidDate("not-a-date".to_string()))
        );
        assert_eq!(engine.availability()["suite"], 9);
    }

    #[test]
    fn released_rooms_can_be_rebooked() {
        let engine = engine(1);
        let first = engine.book("Alice", "double_bed", "2024-01-01").unwrap();
        engine.checkout(first, "2024-01-02").unwrap();

        let second = engine.book("Bob", "double_bed", "2024-02-01").unwrap();
        assert_eq!(first, second, "the freed room must be reassignable");
        let receipt = engine.checkout(second, "2024-02-03").unwrap();
        // double_bed has a nightly rate of 100
        assert_eq!(receipt, Receipt { nights: 2, total: 200 });
    }

    #[test]
    fn availability_reports_every_type() {
        let engine = engine(10);
        let availability = engine.availability();
        assert_eq!(availability.len(), 3);
        assert!(availability.values().all(|&free| free == 10));
    }
}
