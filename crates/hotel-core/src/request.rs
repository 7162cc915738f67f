use std::io;

/// Kind of the request
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum RequestKind {
    /// Retrieve the number of free rooms per room type
    GetAvailability,

    /// Book a free room of a requested type
    ///
    /// The body carries the customer name, room type, and check-in date.
    BookRoom,

    /// Check out of a previously booked room, settling the bill
    ///
    /// The body carries the room number and checkout date.
    Checkout,
}

/// Request sent from a client
///
/// The dispatcher primarily interacts with instances of this type; the
/// transport behind it stays hidden behind [`RawRequest`].
pub struct Request {
    kind: RequestKind,
    raw: Box<dyn RawRequest + Send>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("kind", &self.kind)
            .field("raw", &format_args!(".."))
            .finish()
    }
}

/// HTTP request method
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestMethod {
    /// GET request
    Get,
    /// POST request, may have a payload
    Post,
}

/// Interface for handling decoded requests
///
/// The dispatcher sitting in front of the booking engine implements this
/// trait.
pub trait RequestHandler {
    /// Handle a request from a client
    ///
    /// This method may be called concurrently from different threads.
    fn handle(&self, request: Request);
}

/// A raw request, implemented by the HTTP server
///
/// The responding methods consume the request: every request is answered
/// exactly once.
pub trait RawRequest {
    /// Get the URL
    fn url(&self) -> &str;
    /// Get the request method
    fn method(&self) -> RequestMethod;

    /// Read the request body as a UTF-8 string
    fn read_string(&mut self) -> io::Result<String>;

    /// Respond with a success payload
    fn respond_with_string(self: Box<Self>, s: String);
    /// Respond with a client error (invalid input or unsatisfiable booking)
    fn respond_with_err(self: Box<Self>, err: String);
    /// Respond with "not found" (e.g. an unknown room number)
    fn respond_with_not_found(self: Box<Self>, err: String);
    /// Respond with an internal server error
    fn respond_with_internal_err(self: Box<Self>, err: String);
}

impl Request {
    /// Get the request's kind
    #[inline]
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    /// Get the request URL
    #[inline]
    #[allow(unused)]
    pub fn url(&self) -> &str {
        self.raw.url()
    }

    /// Get the request method
    #[inline]
    #[allow(unused)]
    pub fn method(&self) -> RequestMethod {
        self.raw.method()
    }

    /// Read the payload provided by the client as a UTF-8 string
    ///
    /// Returns [`Err`] if the payload is invalid UTF-8 or in case of a
    /// communication error. See [`std::io::Read::read_to_string()`] for more
    /// details. This method has side effects and should be called only once
    /// per request.
    #[inline]
    pub fn read_string(&mut self) -> io::Result<String> {
        self.raw.read_string()
    }

    /// Respond with a success payload, e.g. a booking confirmation.
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_string(self, s: impl Into<String>) {
        self.raw.respond_with_string(s.into());
    }

    /// Respond with an error indicating an invalid request to the client.
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_err(self, err: impl Into<String>) {
        self.raw.respond_with_err(err.into());
    }

    /// Respond that the requested resource does not exist.
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_not_found(self, err: impl Into<String>) {
        self.raw.respond_with_not_found(err.into());
    }

    /// Respond with an internal server error.
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_internal_err(self, err: impl Into<String>) {
        self.raw.respond_with_internal_err(err.into());
    }

    /// Create a new request from a [`RawRequest`]
    #[inline]
    pub fn from_raw(kind: RequestKind, raw: Box<dyn RawRequest + Send>) -> Self {
        Self { kind, raw }
    }
}
