//! Pulling credentials out of a parsed request.

use serde::Deserialize;

use crate::error::{AuthFailure, GatewayError};
use crate::http::request::Request;

/// Body of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Parses a login body of the form `{"username": "...", "password": "..."}`.
///
/// Unknown extra fields are ignored; anything else that is not exactly an
/// object carrying both string fields is a `MalformedRequest`.
pub fn parse_login(body: &[u8]) -> Result<LoginRequest, GatewayError> {
    if body.is_empty() {
        return Err(GatewayError::MalformedRequest("empty login body".into()));
    }

    serde_json::from_slice(body).map_err(|e| GatewayError::MalformedRequest(e.to_string()))
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// A missing header and an unusable one are reported differently so the
/// client can tell them apart.
pub fn bearer_token(request: &Request) -> Result<&str, AuthFailure> {
    let value = request
        .header("Authorization")
        .ok_or(AuthFailure::MissingAuthorization)?;

    // A bare CR or LF means the header line was never properly terminated.
    if value.contains(['\r', '\n']) {
        return Err(AuthFailure::InvalidAuthorization);
    }

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthFailure::InvalidAuthorization)?;

    if scheme != "Bearer" {
        return Err(AuthFailure::InvalidAuthorization);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthFailure::InvalidAuthorization);
    }

    Ok(token)
}
