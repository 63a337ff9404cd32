// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Account roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account roles for authorization.
///
/// The set is closed: an unrecognized role string fails deserialization
/// instead of silently falling through. There is no role hierarchy — a route
/// admits exactly the roles it lists, so `Admin` is not implicitly allowed on
/// donor-only routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Blood donor
    Donor,
    /// Hospital requesting and holding blood units
    Hospital,
    /// Blood lab collecting and testing units
    BloodLab,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Parse a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "donor" => Some(Role::Donor),
            "hospital" => Some(Role::Hospital),
            "blood-lab" => Some(Role::BloodLab),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Donor => write!(f, "donor"),
            Role::Hospital => write!(f, "hospital"),
            Role::BloodLab => write!(f, "blood-lab"),
            Role::Admin => write!(f, "admin"),
        }
    }
}
