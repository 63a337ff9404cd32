// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Authentication and authorization errors.
//!
//! Each variant carries the exact client-facing reason string. The gate
//! recovers every anticipated failure into one of these; no verification
//! error escapes to a generic handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Denial reasons surfaced by the auth gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Missing header, wrong scheme, or anything other than `Bearer <token>`
    #[error("no token provided")]
    NoToken,
    /// Correctly signed token whose expiry is in the past.
    /// Distinguished so clients can refresh silently instead of prompting
    /// for credentials again.
    #[error("token expired")]
    TokenExpired,
    /// Bad signature, wrong algorithm, malformed token, or an unanticipated
    /// internal failure (which is logged but never detailed to the client)
    #[error("token invalid")]
    TokenInvalid,
    /// Valid token whose subject no longer resolves to an active account
    #[error("token is not valid")]
    StalePrincipal,
    /// `authorize` ran without `authenticate` attaching a principal.
    /// A route-wiring bug, not a client error, but still denied for safety.
    #[error("user not authenticated")]
    NotAuthenticated,
    /// Authenticated, but the role is not in the route's allowed set
    #[error("insufficient permissions")]
    InsufficientPermissions,
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    message: String,
}

impl AuthError {
    /// Get the HTTP status code for this denial.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoToken
            | AuthError::TokenExpired
            | AuthError::TokenInvalid
            | AuthError::StalePrincipal
            | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
