// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! JWT claims and the sanitized principal attached to requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BloodGroup;
use crate::storage::StoredPrincipal;

use super::roles::Role;

/// Claims carried by a BloodLink access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Principal id the token was issued for
    pub id: String,
    /// Role claimed at issuance time
    pub role: Role,
    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,
    /// Expiry timestamp (Unix seconds)
    pub exp: i64,
}

/// Authenticated account attached to a request by the auth gate.
///
/// Built from the stored record with sensitive fields stripped: there is no
/// password-hash field on this type at all, so it cannot leak into a response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Principal {
    /// Unique account identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Account role
    pub role: Role,
    /// Whether the account is active
    pub active: bool,
    /// Donor blood group (donors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<StoredPrincipal> for Principal {
    fn from(stored: StoredPrincipal) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            email: stored.email,
            role: stored.role,
            active: stored.active,
            blood_group: stored.blood_group,
            created_at: stored.created_at,
        }
    }
}
