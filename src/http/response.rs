use serde::Serialize;

/// Permissive CORS headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

/// HTTP status codes produced by the gateway.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Malformed request
/// - `Unauthorized` (401): Missing or rejected credentials
/// - `NotFound` (404): No such endpoint
/// - `InternalServerError` (500): Server error (e.g. session store full)
/// - `Other`: any other code, rendered with a generic reason phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    Other(u16),
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use bastion::http::response::StatusCode;
    /// assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
    /// assert_eq!(StatusCode::Other(418).as_u16(), 418);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::Other(code) => *code,
        }
    }

    /// Maps a numeric code back to a status, falling back to `Other`.
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            401 => StatusCode::Unauthorized,
            404 => StatusCode::NotFound,
            500 => StatusCode::InternalServerError,
            other => StatusCode::Other(other),
        }
    }

    /// Returns the reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use bastion::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::Other(302).reason_phrase(), "Unknown");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::Other(_) => "Unknown",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they will be written
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header (names compared case-insensitively).
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Adds the fixed CORS headers.
    pub fn cors(mut self) -> Self {
        for (key, value) in CORS_HEADERS {
            self = self.header(key, value);
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// Appends `Content-Length` from the body size unless already set, then
    /// `Connection: close` since every connection serves exactly one request.
    pub fn build(self) -> Response {
        let content_length = self.body.len().to_string();
        let mut builder = self;
        if !builder.has_header("Content-Length") {
            builder = builder.header("Content-Length", content_length);
        }
        if !builder.has_header("Connection") {
            builder = builder.header("Connection", "close");
        }

        Response {
            status: builder.status,
            headers: builder.headers,
            body: builder.body,
        }
    }

    fn has_header(&self, key: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl Response {
    /// A response with the given content type, CORS headers and body.
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", content_type)
            .cors()
            .body(body)
            .build()
    }

    /// Serializes `value` as an `application/json` response.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Response::new(status, "application/json", body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                Response::internal_error()
            }
        }
    }

    /// Empty `200 OK` for CORS preflight requests.
    pub fn preflight() -> Self {
        Response::new(StatusCode::Ok, "text/plain", Vec::new())
    }

    pub fn not_found() -> Self {
        Response::new(
            StatusCode::NotFound,
            "application/json",
            br#"{"error":"Endpoint not found"}"#.to_vec(),
        )
    }

    pub fn bad_request() -> Self {
        Response::new(
            StatusCode::BadRequest,
            "application/json",
            br#"{"success":false,"message":"Malformed request"}"#.to_vec(),
        )
    }

    pub fn internal_error() -> Self {
        Response::new(
            StatusCode::InternalServerError,
            "application/json",
            br#"{"success":false,"message":"Internal server error"}"#.to_vec(),
        )
    }

    /// Retrieves a header value by name, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
