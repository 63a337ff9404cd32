// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Repository layer providing typed access to document storage.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStorage for all file operations.

pub mod camps;
pub mod principals;
pub mod requests;
pub mod units;

pub use camps::{CampRepository, CampStatus, StoredCamp};
pub use principals::{PrincipalRepository, StoredPrincipal};
pub use requests::{RequestRepository, RequestStatus, StoredBloodRequest};
pub use units::{StoredUnit, UnitRepository, UnitStatus};
