//! Per-request dispatch.
//!
//! Each request is handled on its own; the only state carried between
//! requests is what the session store remembers about issued tokens.

use crate::error::{AuthFailure, GatewayError};
use crate::gateway::Gateway;
use crate::gateway::reply::{Discovery, Reply};
use crate::http::extract::{bearer_token, parse_login};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

/// Where a request is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Login,
    Logout,
    Admin,
    Index,
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method, path) {
            (Method::OPTIONS, _) => Route::Preflight,
            (Method::POST, "/login") => Route::Login,
            (Method::POST, "/logout") => Route::Logout,
            (Method::GET, "/admin") => Route::Admin,
            (Method::GET, "/") => Route::Index,
            _ => Route::NotFound,
        }
    }
}

impl Gateway {
    /// Produces the response for one request.
    pub fn route(&self, req: &Request) -> Response {
        let route = Route::resolve(&req.method, req.route_path());

        let response = match route {
            Route::Preflight => Ok(Response::preflight()),
            Route::Login => self.login(req),
            Route::Logout => self.logout(req),
            Route::Admin => self.admin(req),
            Route::Index => Ok(Response::json(StatusCode::Ok, &Discovery::default())),
            Route::NotFound => Ok(Response::not_found()),
        };

        let response = response.unwrap_or_else(|e| {
            tracing::warn!(
                method = %req.method,
                path = %req.path,
                error = %e,
                "Request rejected"
            );
            e.into_response()
        });

        tracing::info!(
            method = %req.method,
            path = %req.path,
            status = response.status.as_u16(),
            "Request handled"
        );

        response
    }

    fn login(&self, req: &Request) -> Result<Response, GatewayError> {
        let login = parse_login(&req.body)?;

        if !self.credentials().check(&login.username, &login.password) {
            return Err(AuthFailure::InvalidCredentials.into());
        }

        let token = self.sessions().create()?;
        tracing::info!(active = self.sessions().active_count(), "Administrator logged in");

        Ok(Response::json(StatusCode::Ok, &Reply::login(&token)))
    }

    fn logout(&self, req: &Request) -> Result<Response, GatewayError> {
        let token = bearer_token(req)?;

        if !self.sessions().invalidate(token) {
            return Err(AuthFailure::InvalidToken.into());
        }

        Ok(Response::json(
            StatusCode::Ok,
            &Reply::success("Logout successful"),
        ))
    }

    fn admin(&self, req: &Request) -> Result<Response, GatewayError> {
        let token = bearer_token(req)?;

        if !self.sessions().validate(token) {
            return Err(AuthFailure::InvalidToken.into());
        }

        Ok(Response::json(StatusCode::Ok, &Reply::access_granted()))
    }
}
