//! HTTP protocol handling.
//!
//! Just enough HTTP/1.1 for the gateway: one request per connection, no
//! keep-alive, no chunked bodies.
//!
//! - **`connection`**: per-connection request/response state machine
//! - **`parser`**: parses an incoming request from a byte buffer
//! - **`request`**: request representation and header helpers
//! - **`extract`**: login body and bearer token extraction
//! - **`response`**: response representation with builder pattern
//! - **`writer`**: serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request
//!        └──────┬──────┘
//!               │ Request received (or rejected → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route through the gateway
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod extract;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
