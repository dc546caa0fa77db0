//! Error taxonomy for the gateway.
//!
//! Every variant except [`GatewayError::Transport`] is recovered by the
//! router and turned into a JSON response; transport failures only ever
//! close the connection they happened on.

use thiserror::Error;

use crate::gateway::reply::Reply;
use crate::http::response::{Response, StatusCode};

/// Why a request failed to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Username or password did not match the administrator identity
    InvalidCredentials,
    /// No `Authorization` header was sent
    MissingAuthorization,
    /// `Authorization` header present but not a usable bearer credential
    InvalidAuthorization,
    /// Bearer token unknown, expired or invalidated
    InvalidToken,
}

impl AuthFailure {
    /// Client-facing message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "Invalid credentials",
            AuthFailure::MissingAuthorization => "Authorization header required",
            AuthFailure::InvalidAuthorization => "Invalid authorization header",
            AuthFailure::InvalidToken => "Invalid or expired token",
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(AuthFailure),

    #[error("session capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

impl From<AuthFailure> for GatewayError {
    fn from(failure: AuthFailure) -> Self {
        GatewayError::AuthenticationFailed(failure)
    }
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MalformedRequest(_) => StatusCode::BadRequest,
            GatewayError::AuthenticationFailed(_) => StatusCode::Unauthorized,
            GatewayError::CapacityExceeded { .. } | GatewayError::Transport(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Renders the error as the JSON failure body clients see.
    ///
    /// Internal details (capacity, io error text) stay in the logs.
    pub fn into_response(self) -> Response {
        let message = match &self {
            GatewayError::MalformedRequest(_) => "Invalid request format",
            GatewayError::AuthenticationFailed(failure) => failure.message(),
            GatewayError::CapacityExceeded { .. } => "Session creation failed",
            GatewayError::Transport(_) => "Internal server error",
        };

        Response::json(self.status(), &Reply::failure(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_maps_to_500() {
        let resp = GatewayError::CapacityExceeded { capacity: 3 }.into_response();
        assert_eq!(resp.status, StatusCode::InternalServerError);
        assert_eq!(
            resp.body,
            br#"{"success":false,"message":"Session creation failed"}"#.to_vec()
        );
    }

    #[test]
    fn auth_failures_map_to_401() {
        let err: GatewayError = AuthFailure::MissingAuthorization.into();
        assert_eq!(err.status(), StatusCode::Unauthorized);
        assert_eq!(err.to_string(), "authentication failed: Authorization header required");
    }
}
