//! The front desk: dispatch of decoded requests onto the booking engine
//!
//! The front desk owns the body decoding (request bodies are plain
//! comma-separated fields) and the rendering of engine results into
//! responses. Malformed bodies are rejected here and never reach the
//! engine.

use hotel_core::{Request, RequestHandler, RequestKind};

use crate::engine::BookingEngine;
use crate::error::BookingError;

/// A request handler serving the three reservation operations
///
/// One instance is shared by all transport threads; the engine's per-bucket
/// locks carry the synchronization.
pub struct FrontDesk {
    engine: BookingEngine,
}

impl FrontDesk {
    /// Create a front desk over the given engine.
    pub fn new(engine: BookingEngine) -> Self {
        Self { engine }
    }

    /// The underlying engine
    #[inline]
    pub fn engine(&self) -> &BookingEngine {
        &self.engine
    }

    fn handle_availability(&self, rq: Request) {
        match serde_json::to_string(&self.engine.availability()) {
            Ok(json) => rq.respond_with_string(json),
            Err(err) => {
                tracing::error!(%err, "failed to render availability");
                rq.respond_with_internal_err("internal server error");
            }
        }
    }

    fn handle_book(&self, mut rq: Request) {
        let body = match rq.read_string() {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(%err, "unreadable request body");
                return rq.respond_with_err("unreadable request body");
            }
        };

        let mut fields = body.trim().splitn(3, ',');
        let (Some(guest), Some(room_type), Some(checkin)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return rq.respond_with_err("expected body: customer_name,room_type,checkin_date");
        };

        match self
            .engine
            .book(guest.trim(), room_type.trim(), checkin.trim())
        {
            Ok(number) => rq.respond_with_string(format!("Room {number} booked successfully!")),
            Err(err) => respond_with_booking_err(rq, err),
        }
    }

    fn handle_checkout(&self, mut rq: Request) {
        let body = match rq.read_string() {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(%err, "unreadable request body");
                return rq.respond_with_err("unreadable request body");
            }
        };

        let mut fields = body.trim().splitn(2, ',');
        let (Some(number), Some(checkout)) = (fields.next(), fields.next()) else {
            return rq.respond_with_err("expected body: room_number,checkout_date");
        };
        let Ok(number) = number.trim().parse::<u32>() else {
            return rq.respond_with_err("room number must be an integer");
        };

        match self.engine.checkout(number, checkout.trim()) {
            Ok(receipt) => rq.respond_with_string(format!(
                "Days stayed: {}, Total bill: ${}",
                receipt.nights, receipt.total
            )),
            Err(err) => respond_with_booking_err(rq, err),
        }
    }
}

/// Map an engine failure onto a response class.
///
/// Validation and business failures are client errors; a missing room is
/// "not found"; a store-level `UnknownRoomType` means the engine's own type
/// check was bypassed, which is an internal fault.
fn respond_with_booking_err(rq: Request, err: BookingError) {
    match err {
        BookingError::RoomNotFound(_) => rq.respond_with_not_found(err.to_string()),
        BookingError::UnknownRoomType(_) => {
            tracing::error!(%err, "inventory lookup failed for a validated type");
            rq.respond_with_internal_err("internal server error");
        }
        _ => rq.respond_with_err(err.to_string()),
    }
}

impl RequestHandler for FrontDesk {
    fn handle(&self, rq: Request) {
        match rq.kind() {
            RequestKind::GetAvailability => self.handle_availability(rq),
            RequestKind::BookRoom => self.handle_book(rq),
            RequestKind::Checkout => self.handle_checkout(rq),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::mpsc;

    use hotel_core::{Config, RawRequest, RequestMethod};

    use super::*;

    /// Raw request fed to the desk directly, without an HTTP server
    struct MockRequest {
        kind: RequestKind,
        body: Option<String>,
        response: mpsc::Sender<MockResponse>,
    }

    #[derive(Debug, PartialEq, Eq)]
    enum MockResponse {
        Ok(String),
        ClientErr(String),
        NotFound(String),
        Internal(String),
    }

    impl RawRequest for MockRequest {
        fn url(&self) -> &str {
            match self.kind {
                RequestKind::GetAvailability => "/availability",
                RequestKind::BookRoom => "/book",
                RequestKind::Checkout => "/checkout",
            }
        }

        fn method(&self) -> RequestMethod {
            match self.kind {
                RequestKind::GetAvailability => RequestMethod::Get,
                _ => RequestMethod::Post,
            }
        }

        fn read_string(&mut self) -> io::Result<String> {
            Ok(self.body.take().unwrap_or_default())
        }

        fn respond_with_string(self: Box<Self>, s: String) {
            self.response.send(MockResponse::Ok(s)).unwrap();
        }

        fn respond_with_err(self: Box<Self>, err: String) {
            self.response.send(MockResponse::ClientErr(err)).unwrap();
        }

        fn respond_with_not_found(self: Box<Self>, err: String) {
            self.response.send(MockResponse::NotFound(err)).unwrap();
        }

        fn respond_with_internal_err(self: Box<Self>, err: String) {
            self.response.send(MockResponse::Internal(err)).unwrap();
        }
    }

    fn send(desk: &FrontDesk, kind: RequestKind, body: Option<&str>) -> MockResponse {
        let (tx, rx) = mpsc::channel();
        let raw = Box::new(MockRequest {
            kind,
            body: body.map(str::to_string),
            response: tx,
        });
        desk.handle(Request::from_raw(kind, raw));
        rx.recv().expect("every request must be answered")
    }

    fn desk() -> FrontDesk {
        crate::launch(&Config { rooms_per_type: 2 })
    }

    #[test]
    fn availability_renders_as_json() {
        let desk = desk();
        let MockResponse::Ok(json) = send(&desk, RequestKind::GetAvailability, None) else {
            panic!("availability must succeed");
        };
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["single_bed"], 2);
        assert_eq!(parsed["double_bed"], 2);
        assert_eq!(parsed["suite"], 2);
    }

    #[test]
    fn booking_and_checkout_round_trip() {
        let desk = desk();

        let response = send(&desk, RequestKind::BookRoom, Some("Alice,single_bed,2024-01-01"));
        let MockResponse::Ok(confirmation) = response else {
            panic!("booking must succeed, got {response:?}");
        };
        let number: u32 = confirmation
            .strip_prefix("Room ")
            .and_then(|s| s.strip_suffix(" booked successfully!"))
            .expect("confirmation carries the room number")
            .parse()
            .unwrap();

        let response = send(
            &desk,
            RequestKind::Checkout,
            Some(&format!("{number},2024-01-04")),
        );
        assert_eq!(
            response,
            MockResponse::Ok("Days stayed: 3, Total bill: $150".to_string())
        );
    }

    #[test]
    fn malformed_book_bodies_are_client_errors() {
        let desk = desk();
        for body in [None, Some("Alice"), Some("Alice,suite")] {
            assert!(
                matches!(
                    send(&desk, RequestKind::BookRoom, body),
                    MockResponse::ClientErr(_)
                ),
                "body {body:?} must be rejected"
            );
        }
        // Nothing reached the engine.
        assert_eq!(desk.engine().availability()["suite"], 2);
    }

    #[test]
    fn malformed_checkout_bodies_are_client_errors() {
        let desk = desk();
        for body in [None, Some("105"), Some("five,2024-01-04")] {
            assert!(
                matches!(
                    send(&desk, RequestKind::Checkout, body),
                    MockResponse::ClientErr(_)
                ),
                "body {body:?} must be rejected"
            );
        }
    }

    #[test]
    fn engine_failures_map_onto_response_classes() {
        let desk = desk();

        assert!(matches!(
            send(&desk, RequestKind::BookRoom, Some("Alice,penthouse,2024-01-01")),
            MockResponse::ClientErr(_)
        ));
        assert!(matches!(
            send(&desk, RequestKind::BookRoom, Some("Alice,suite,January 1st")),
            MockResponse::ClientErr(_)
        ));
        assert_eq!(
            send(&desk, RequestKind::Checkout, Some("999,2024-01-04")),
            MockResponse::NotFound("room 999 not found".to_string())
        );
        assert_eq!(
            send(&desk, RequestKind::Checkout, Some("101,2024-01-04")),
            MockResponse::ClientErr("room 101 is not occupied".to_string())
        );
    }

    #[test]
    fn guest_names_may_contain_spaces() {
        let desk = desk();
        assert!(matches!(
            send(&desk, RequestKind::BookRoom, Some("Ada Lovelace,suite,2024-01-01")),
            MockResponse::Ok(_)
        ));
    }
}
