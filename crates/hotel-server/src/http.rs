//! 🏗 HTTP request implementation

use std::io;
use std::io::Read;

use hotel_core::RequestKind;
use tiny_http::Response;

struct HTTPRequest(tiny_http::Request);

impl hotel_core::RawRequest for HTTPRequest {
    fn url(&self) -> &str {
        self.0.url()
    }

    fn method(&self) -> hotel_core::RequestMethod {
        match self.0.method() {
            tiny_http::Method::Get => hotel_core::RequestMethod::Get,
            tiny_http::Method::Post => hotel_core::RequestMethod::Post,
            _ => unreachable!(),
        }
    }

    fn read_string(&mut self) -> io::Result<String> {
        let mut s = String::with_capacity(self.0.body_length().unwrap_or(0));
        self.0.as_reader().read_to_string(&mut s)?;
        Ok(s)
    }

    fn respond_with_string(self: Box<Self>, s: String) {
        self.respond(Response::from_string(s).with_status_code(200))
    }

    fn respond_with_err(self: Box<Self>, err: String) {
        self.respond(Response::from_string(err).with_status_code(400))
    }

    fn respond_with_not_found(self: Box<Self>, err: String) {
        self.respond(Response::from_string(err).with_status_code(404))
    }

    fn respond_with_internal_err(self: Box<Self>, err: String) {
        self.respond(Response::from_string(err).with_status_code(500))
    }
}

impl HTTPRequest {
    fn respond<R: Read>(self, res: Response<R>) {
        self.0.respond(res).expect("HTTP response failed");
    }
}

/// Parse the given HTTP request
///
/// If [`None`] is returned, the request was already answered with a
/// corresponding error message.
pub fn parse(rq: tiny_http::Request) -> Option<hotel_core::Request> {
    use tiny_http::Method::*;

    let kind = match (rq.method(), rq.url()) {
        (Get, "/availability") => RequestKind::GetAvailability,
        (Post, "/book") => RequestKind::BookRoom,
        (Post, "/checkout") => RequestKind::Checkout,
        (Get, _) | (Post, _) => {
            let res = Response::from_string(
                "🛎 could not find the service you are looking for!

Valid requests are:
  GET  /availability
  POST /book
  POST /checkout",
            )
            .with_status_code(404);
            rq.respond(res).expect("HTTP response failed");
            return None;
        }
        _ => {
            rq.respond(Response::empty(405)).expect("HTTP response failed");
            return None;
        }
    };

    Some(hotel_core::Request::from_raw(kind, Box::new(HTTPRequest(rq))))
}
