// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Access-token issuance and verification.
//!
//! One [`TokenService`] is constructed at startup from the configured secret
//! and injected into [`crate::state::AppState`]; nothing here reads the
//! environment. Tests construct their own instances with distinct secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::{AuthError, Claims, Role};

/// Issues and verifies HS256 access tokens against a single shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenService {
    /// Create a token service for the given secret and validity window.
    pub fn new(secret: &str, validity_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(validity_days),
        }
    }

    /// Mint a token for a principal.
    pub fn issue(&self, principal_id: &str, role: Role) -> jsonwebtoken::errors::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            id: principal_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token and return its claims.
    ///
    /// Exactly two failure modes are distinguished: an expired signature on
    /// an otherwise valid token, and everything else. Claims from a token
    /// whose signature does not verify are never read, so a tampered token
    /// with a past `exp` still reports "token invalid", not "token expired".
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry must be strictly in the future at verification time.
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(AuthError::TokenExpired)
            }
            Err(_) => Err(AuthError::TokenInvalid),
        }
    }
}
