// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Handler-side extractor for the authenticated principal.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Principal};

/// Extracts the [`Principal`] attached by the authentication middleware.
///
/// Reads request extensions only; it never parses or verifies the token
/// itself. Using this in a handler whose route is not behind
/// [`super::authenticate`] yields "user not authenticated", the same
/// wiring-defect denial the authorization layer produces.
#[derive(Debug)]
pub struct Auth(pub Principal);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| {
                tracing::error!(
                    path = %parts.uri.path(),
                    "handler requested a principal but none was attached; check route wiring"
                );
                AuthError::NotAuthenticated
            })
    }
}
