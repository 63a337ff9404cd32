// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Blood-request repository.
//!
//! Each inter-party blood request is stored as a separate JSON document under
//! `/data/requests/`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BloodGroup;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Lifecycle status of a blood request.
///
/// Allowed transitions: `Pending -> Approved | Rejected`,
/// `Approved -> Fulfilled`. Everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
}

impl RequestStatus {
    /// Whether a request may move from `self` to `next`.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Fulfilled)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Fulfilled => "fulfilled",
        };
        write!(f, "{s}")
    }
}

/// Blood request as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoredBloodRequest {
    /// Unique request identifier (UUID)
    pub id: String,
    /// Account that filed the request
    pub requester_id: String,
    /// Requested ABO/Rh group
    pub blood_group: BloodGroup,
    /// Number of units requested
    pub units: u32,
    /// Free-text urgency or reason note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Current status
    pub status: RequestStatus,
    /// When the request was filed
    pub created_at: DateTime<Utc>,
    /// When the request was last approved/rejected/fulfilled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Repository for blood-request operations on document storage.
pub struct RequestRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> RequestRepository<'a> {
    /// Create a new RequestRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a request exists.
    pub fn exists(&self, request_id: &str) -> bool {
        self.storage.exists(self.storage.paths().request(request_id))
    }

    /// Get a request by ID.
    pub fn get(&self, request_id: &str) -> StorageResult<StoredBloodRequest> {
        let path = self.storage.paths().request(request_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Blood request {request_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new request.
    pub fn create(&self, request: &StoredBloodRequest) -> StorageResult<()> {
        if self.exists(&request.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Blood request {}",
                request.id
            )));
        }

        self.storage
            .write_json(self.storage.paths().request(&request.id), request)
    }

    /// Move a request to a new status, enforcing the transition rules.
    pub fn set_status(
        &self,
        request_id: &str,
        next: RequestStatus,
    ) -> StorageResult<StoredBloodRequest> {
        let mut request = self.get(request_id)?;

        if !request.status.can_transition_to(next) {
            return Err(StorageError::InvalidState(format!(
                "blood request {request_id} cannot move from {} to {}",
                request.status, next
            )));
        }

        request.status = next;
        request.decided_at = Some(Utc::now());

        self.storage
            .write_json(self.storage.paths().request(request_id), &request)?;
        Ok(request)
    }

    /// List all requests filed by an account.
    pub fn list_by_requester(&self, requester_id: &str) -> StorageResult<Vec<StoredBloodRequest>> {
        let requests = self
            .list_all()?
            .into_iter()
            .filter(|r| r.requester_id == requester_id)
            .collect();
        Ok(requests)
    }

    /// List all pending requests (the review queue).
    pub fn list_pending(&self) -> StorageResult<Vec<StoredBloodRequest>> {
        let requests = self
            .list_all()?
            .into_iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect();
        Ok(requests)
    }

    /// List all requests.
    pub fn list_all(&self) -> StorageResult<Vec<StoredBloodRequest>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().requests_dir(), "json")?;

        let mut requests = Vec::new();
        for id in ids {
            if let Ok(request) = self.get(&id) {
                requests.push(request);
            }
        }

        Ok(requests)
    }
}
