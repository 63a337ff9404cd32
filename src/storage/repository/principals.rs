// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Principal (account) repository.
//!
//! This is the Principal Store the auth gate resolves credentials against.
//! Each account is stored as a separate JSON document under
//! `/data/principals/`. The stored record carries the password hash; the auth
//! layer converts it to a sanitized [`crate::auth::Principal`] before anything
//! leaves this layer toward a response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::models::BloodGroup;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Account record as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredPrincipal {
    /// Unique account identifier (UUID)
    pub id: String,
    /// Display name (person, hospital, or lab name)
    pub name: String,
    /// Login email, unique across accounts
    pub email: String,
    /// bcrypt password hash. Never included in API responses.
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// Inactive accounts fail credential resolution on their next request.
    pub active: bool,
    /// Donor blood group (donors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Repository for account operations on document storage.
pub struct PrincipalRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> PrincipalRepository<'a> {
    /// Create a new PrincipalRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if an account exists.
    pub fn exists(&self, principal_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().principal(principal_id))
    }

    /// Get an account by ID.
    pub fn get(&self, principal_id: &str) -> StorageResult<StoredPrincipal> {
        let path = self.storage.paths().principal(principal_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Principal {principal_id}")));
        }
        self.storage.read_json(path)
    }

    /// Get an account by login email.
    pub fn get_by_email(&self, email: &str) -> StorageResult<StoredPrincipal> {
        let ids = self
            .storage
            .list_files(self.storage.paths().principals_dir(), "json")?;

        for id in ids {
            if let Ok(principal) = self.get(&id) {
                if principal.email.eq_ignore_ascii_case(email) {
                    return Ok(principal);
                }
            }
        }

        Err(StorageError::NotFound(format!("Principal with email {email}")))
    }

    /// Create a new account.
    ///
    /// Rejects duplicate ids and duplicate emails.
    pub fn create(&self, principal: &StoredPrincipal) -> StorageResult<()> {
        if self.exists(&principal.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Principal {}",
                principal.id
            )));
        }

        if self.get_by_email(&principal.email).is_ok() {
            return Err(StorageError::AlreadyExists(format!(
                "Principal with email {}",
                principal.email
            )));
        }

        self.storage
            .write_json(self.storage.paths().principal(&principal.id), principal)
    }

    /// Update an existing account.
    pub fn update(&self, principal: &StoredPrincipal) -> StorageResult<()> {
        if !self.exists(&principal.id) {
            return Err(StorageError::NotFound(format!(
                "Principal {}",
                principal.id
            )));
        }

        self.storage
            .write_json(self.storage.paths().principal(&principal.id), principal)
    }

    /// Delete an account.
    pub fn delete(&self, principal_id: &str) -> StorageResult<()> {
        if !self.exists(principal_id) {
            return Err(StorageError::NotFound(format!("Principal {principal_id}")));
        }

        self.storage
            .delete(self.storage.paths().principal(principal_id))
    }

    /// Flip the active flag on an account.
    ///
    /// Deactivation is the platform's revocation lever: an inactive account
    /// fails credential resolution even if its token has not yet expired.
    pub fn set_active(&self, principal_id: &str, active: bool) -> StorageResult<StoredPrincipal> {
        let mut principal = self.get(principal_id)?;
        principal.active = active;
        self.update(&principal)?;
        Ok(principal)
    }

    /// List all accounts (admin view).
    pub fn list_all(&self) -> StorageResult<Vec<StoredPrincipal>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().principals_dir(), "json")?;

        let mut principals = Vec::new();
        for id in ids {
            if let Ok(principal) = self.get(&id) {
                principals.push(principal);
            }
        }

        Ok(principals)
    }
}
