// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! # Document Storage Module
//!
//! Persistent storage keeps one JSON document per entity on the local
//! filesystem. The platform treats this layer as an opaque document store:
//! handlers go through typed repositories and never touch paths directly.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   principals/
//!     {principal_id}.json   # Account record (includes password hash)
//!   units/
//!     {unit_id}.json        # Blood unit
//!   camps/
//!     {camp_id}.json        # Donation camp
//!   requests/
//!     {request_id}.json     # Blood request
//! ```
//!
//! Writes are atomic (temp file + rename) so a crashed process never leaves a
//! half-written document behind.

pub mod document_fs;
pub mod paths;
pub mod repository;

pub use document_fs::{DocumentStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    CampRepository, CampStatus, PrincipalRepository, RequestRepository, RequestStatus,
    StoredBloodRequest, StoredCamp, StoredPrincipal, StoredUnit, UnitRepository, UnitStatus,
};
