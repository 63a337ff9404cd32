// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Donation-camp repository.
//!
//! Each scheduled camp is stored as a separate JSON document under
//! `/data/camps/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Lifecycle status of a donation camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CampStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

/// Donation camp as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredCamp {
    /// Unique camp identifier (UUID)
    pub id: String,
    /// Camp name
    pub name: String,
    /// Account (hospital or blood lab) organizing the camp
    pub organizer_id: String,
    /// Venue description
    pub location: String,
    /// When the camp opens
    pub starts_at: DateTime<Utc>,
    /// When the camp closes
    pub ends_at: DateTime<Utc>,
    /// Current status
    pub status: CampStatus,
    /// When the camp record was created
    pub created_at: DateTime<Utc>,
}

/// Repository for donation-camp operations on document storage.
pub struct CampRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> CampRepository<'a> {
    /// Create a new CampRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a camp exists.
    pub fn exists(&self, camp_id: &str) -> bool {
        self.storage.exists(self.storage.paths().camp(camp_id))
    }

    /// Get a camp by ID.
    pub fn get(&self, camp_id: &str) -> StorageResult<StoredCamp> {
        let path = self.storage.paths().camp(camp_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Camp {camp_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new camp.
    pub fn create(&self, camp: &StoredCamp) -> StorageResult<()> {
        if self.exists(&camp.id) {
            return Err(StorageError::AlreadyExists(format!("Camp {}", camp.id)));
        }

        self.storage
            .write_json(self.storage.paths().camp(&camp.id), camp)
    }

    /// Update an existing camp.
    pub fn update(&self, camp: &StoredCamp) -> StorageResult<()> {
        if !self.exists(&camp.id) {
            return Err(StorageError::NotFound(format!("Camp {}", camp.id)));
        }

        self.storage
            .write_json(self.storage.paths().camp(&camp.id), camp)
    }

    /// Delete a camp.
    pub fn delete(&self, camp_id: &str) -> StorageResult<()> {
        if !self.exists(camp_id) {
            return Err(StorageError::NotFound(format!("Camp {camp_id}")));
        }

        self.storage.delete(self.storage.paths().camp(camp_id))
    }

    /// List all camps.
    pub fn list_all(&self) -> StorageResult<Vec<StoredCamp>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().camps_dir(), "json")?;

        let mut camps = Vec::new();
        for id in ids {
            if let Ok(camp) = self.get(&id) {
                camps.push(camp);
            }
        }

        Ok(camps)
    }

    /// List camps that have not yet ended and are not cancelled.
    pub fn list_upcoming(&self) -> StorageResult<Vec<StoredCamp>> {
        let now = Utc::now();
        let camps = self
            .list_all()?
            .into_iter()
            .filter(|c| c.ends_at > now && c.status != CampStatus::Cancelled)
            .collect();
        Ok(camps)
    }
}
