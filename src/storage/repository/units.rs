// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Blood-unit repository.
//!
//! Each collected unit is stored as a separate JSON document under
//! `/data/units/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BloodGroup;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Lifecycle status of a blood unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// In stock and usable
    Available,
    /// Held against an approved request
    Reserved,
    /// Transfused
    Used,
    /// Past its expiry date
    Expired,
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnitStatus::Available => "available",
            UnitStatus::Reserved => "reserved",
            UnitStatus::Used => "used",
            UnitStatus::Expired => "expired",
        };
        write!(f, "{s}")
    }
}

/// Blood unit as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredUnit {
    /// Unique unit identifier (UUID)
    pub id: String,
    /// ABO/Rh group of the unit
    pub blood_group: BloodGroup,
    /// Volume in milliliters
    pub volume_ml: u32,
    /// Current status
    pub status: UnitStatus,
    /// Account (blood lab or hospital) currently holding the unit
    pub custodian_id: String,
    /// Donor account, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    /// When the unit was collected
    pub collected_at: DateTime<Utc>,
    /// When the unit expires
    pub expires_at: DateTime<Utc>,
}

/// Repository for blood-unit operations on document storage.
pub struct UnitRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> UnitRepository<'a> {
    /// Create a new UnitRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a unit exists.
    pub fn exists(&self, unit_id: &str) -> bool {
        self.storage.exists(self.storage.paths().unit(unit_id))
    }

    /// Get a unit by ID.
    pub fn get(&self, unit_id: &str) -> StorageResult<StoredUnit> {
        let path = self.storage.paths().unit(unit_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Blood unit {unit_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new unit.
    pub fn create(&self, unit: &StoredUnit) -> StorageResult<()> {
        if self.exists(&unit.id) {
            return Err(StorageError::AlreadyExists(format!("Blood unit {}", unit.id)));
        }

        self.storage
            .write_json(self.storage.paths().unit(&unit.id), unit)
    }

    /// Update an existing unit.
    pub fn update(&self, unit: &StoredUnit) -> StorageResult<()> {
        if !self.exists(&unit.id) {
            return Err(StorageError::NotFound(format!("Blood unit {}", unit.id)));
        }

        self.storage
            .write_json(self.storage.paths().unit(&unit.id), unit)
    }

    /// Delete a unit.
    pub fn delete(&self, unit_id: &str) -> StorageResult<()> {
        if !self.exists(unit_id) {
            return Err(StorageError::NotFound(format!("Blood unit {unit_id}")));
        }

        self.storage.delete(self.storage.paths().unit(unit_id))
    }

    /// List all units, optionally filtered by blood group.
    pub fn list(&self, group: Option<BloodGroup>) -> StorageResult<Vec<StoredUnit>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().units_dir(), "json")?;

        let mut units = Vec::new();
        for id in ids {
            if let Ok(unit) = self.get(&id) {
                if group.is_none_or(|g| unit.blood_group == g) {
                    units.push(unit);
                }
            }
        }

        Ok(units)
    }

    /// Count available units per blood group.
    pub fn available_by_group(&self) -> StorageResult<Vec<(BloodGroup, usize)>> {
        let units = self.list(None)?;

        let counts = BloodGroup::ALL
            .into_iter()
            .map(|group| {
                let count = units
                    .iter()
                    .filter(|u| u.blood_group == group && u.status == UnitStatus::Available)
                    .count();
                (group, count)
            })
            .collect();

        Ok(counts)
    }
}
