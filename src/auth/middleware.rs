// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Authentication and authorization middleware for Axum.
//!
//! [`authenticate`] and [`authenticate_admin`] share one verification
//! primitive (header parsing, signature check, principal resolution); the
//! admin variant differs only in checking the token's role claim before the
//! store lookup. [`authorize`] is bound per route subtree with its allowed
//! role set fixed at registration time.
//!
//! Per request the gate performs exactly one store lookup and keeps no state
//! across requests, so deleting or deactivating an account is reflected on
//! that account's next request.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::storage::{PrincipalRepository, StorageError};

use super::{AuthError, Claims, Principal, Role};

/// Role set a route subtree admits. Bound at route-registration time.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [Role]);

/// Extract the bearer token from the Authorization header.
///
/// Accepts exactly `Bearer <token>`: case-insensitive scheme, one single
/// space, one token. Every other shape (missing header, wrong scheme,
/// multiple tokens, stray whitespace) is "no token provided".
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::NoToken)?
        .to_str()
        .map_err(|_| AuthError::NoToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::NoToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(AuthError::NoToken);
    }

    Ok(token)
}

/// Resolve verified claims to an active account.
///
/// A missing or deactivated account yields "token is not valid"; an
/// unanticipated store failure is logged and reported as "token invalid"
/// so internal detail never reaches the client.
fn resolve_principal(state: &AppState, claims: &Claims) -> Result<Principal, AuthError> {
    let repo = PrincipalRepository::new(&state.storage);

    let stored = match repo.get(&claims.id) {
        Ok(stored) => stored,
        Err(StorageError::NotFound(_)) => return Err(AuthError::StalePrincipal),
        Err(e) => {
            tracing::error!(error = %e, principal_id = %claims.id, "principal lookup failed");
            return Err(AuthError::TokenInvalid);
        }
    };

    if !stored.active {
        return Err(AuthError::StalePrincipal);
    }

    Ok(stored.into())
}

/// Authentication middleware for general routes.
///
/// On success the sanitized [`Principal`] is attached to request extensions
/// and the downstream handler runs; on any failure the denial response is
/// sent and the handler is never invoked.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers())?;
    let claims = state.tokens.verify(token)?;
    let principal = resolve_principal(&state, &claims)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Authentication middleware for the admin subtree.
///
/// Same verification primitive as [`authenticate`], but the token's role
/// claim must be `admin` before the store is consulted at all.
pub async fn authenticate_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers())?;
    let claims = state.tokens.verify(token)?;

    if claims.role != Role::Admin {
        return Err(AuthError::InsufficientPermissions);
    }

    let principal = resolve_principal(&state, &claims)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Role-authorization middleware.
///
/// Must run after [`authenticate`] (or [`authenticate_admin`]) has attached
/// a principal. Membership check only: no partial matches, no hierarchy.
pub async fn authorize(
    State(allowed): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(principal) = req.extensions().get::<Principal>() else {
        // A route reached authorize without authenticate in front of it.
        tracing::error!(
            path = %req.uri().path(),
            "authorize ran without a principal attached; check route wiring"
        );
        return Err(AuthError::NotAuthenticated);
    };

    if !allowed.0.contains(&principal.role) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(req).await)
}
