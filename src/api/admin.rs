// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Admin endpoints.
//!
//! Mounted behind the admin authentication gate, which checks the token's
//! role claim before any lookup. Deactivation here is the platform's token
//! revocation lever: a deactivated account fails principal resolution on its
//! next request, regardless of how long its token remains signed and fresh.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::Principal,
    error::ApiError,
    state::AppState,
    storage::{CampRepository, PrincipalRepository, RequestRepository, UnitRepository},
};

/// Platform-wide counts for the admin dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformStats {
    /// Account counts keyed by role
    pub principals_by_role: BTreeMap<String, usize>,
    /// Unit counts keyed by status
    pub units_by_status: BTreeMap<String, usize>,
    pub camps: usize,
    pub requests: usize,
    pub pending_requests: usize,
}

#[utoipa::path(
    get,
    path = "/v1/admin/stats",
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = PlatformStats))
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<PlatformStats>, ApiError> {
    let mut principals_by_role = BTreeMap::new();
    for principal in PrincipalRepository::new(&state.storage).list_all()? {
        *principals_by_role
            .entry(principal.role.to_string())
            .or_insert(0) += 1;
    }

    let mut units_by_status = BTreeMap::new();
    for unit in UnitRepository::new(&state.storage).list(None)? {
        *units_by_status.entry(unit.status.to_string()).or_insert(0) += 1;
    }

    let requests = RequestRepository::new(&state.storage).list_all()?;
    let pending = requests
        .iter()
        .filter(|r| r.status == crate::storage::RequestStatus::Pending)
        .count();

    Ok(Json(PlatformStats {
        principals_by_role,
        units_by_status,
        camps: CampRepository::new(&state.storage).list_all()?.len(),
        requests: requests.len(),
        pending_requests: pending,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/admin/principals",
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = [Principal]))
)]
pub async fn list_principals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Principal>>, ApiError> {
    let principals = PrincipalRepository::new(&state.storage)
        .list_all()?
        .into_iter()
        .map(Principal::from)
        .collect();
    Ok(Json(principals))
}

#[utoipa::path(
    post,
    path = "/v1/admin/principals/{principal_id}/deactivate",
    params(("principal_id" = String, Path, description = "Account to deactivate")),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = Principal), (status = 404))
)]
pub async fn deactivate_principal(
    Path(principal_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Principal>, ApiError> {
    let stored = PrincipalRepository::new(&state.storage).set_active(&principal_id, false)?;
    tracing::info!(principal_id = %principal_id, "account deactivated");
    Ok(Json(stored.into()))
}

#[utoipa::path(
    post,
    path = "/v1/admin/principals/{principal_id}/activate",
    params(("principal_id" = String, Path, description = "Account to reactivate")),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = Principal), (status = 404))
)]
pub async fn activate_principal(
    Path(principal_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Principal>, ApiError> {
    let stored = PrincipalRepository::new(&state.storage).set_active(&principal_id, true)?;
    tracing::info!(principal_id = %principal_id, "account reactivated");
    Ok(Json(stored.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/admin/principals/{principal_id}",
    params(("principal_id" = String, Path, description = "Account to delete")),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 204), (status = 404))
)]
pub async fn delete_principal(
    Path(principal_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    PrincipalRepository::new(&state.storage).delete(&principal_id)?;
    tracing::info!(principal_id = %principal_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, TokenService};
    use crate::storage::{DocumentStorage, StoragePaths, StoredPrincipal};
    use chrono::Utc;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize storage");
        let state = AppState::new(storage, TokenService::new("admin-secret", 7));
        (state, temp_dir)
    }

    fn seed(state: &AppState, id: &str, role: Role) {
        PrincipalRepository::new(&state.storage)
            .create(&StoredPrincipal {
                id: id.to_string(),
                name: "Test".to_string(),
                email: format!("{id}@example.com"),
                password_hash: "$2b$12$hash".to_string(),
                role,
                active: true,
                blood_group: None,
                created_at: Utc::now(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn stats_counts_principals_by_role() {
        let (state, _dir) = test_state();
        seed(&state, "d1", Role::Donor);
        seed(&state, "d2", Role::Donor);
        seed(&state, "h1", Role::Hospital);

        let Json(stats) = stats(State(state)).await.unwrap();
        assert_eq!(stats.principals_by_role.get("donor"), Some(&2));
        assert_eq!(stats.principals_by_role.get("hospital"), Some(&1));
        assert_eq!(stats.camps, 0);
        assert_eq!(stats.requests, 0);
    }

    #[tokio::test]
    async fn listed_principals_are_sanitized() {
        let (state, _dir) = test_state();
        seed(&state, "d1", Role::Donor);

        let Json(principals) = list_principals(State(state)).await.unwrap();
        assert_eq!(principals.len(), 1);
        let json = serde_json::to_string(&principals).unwrap();
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn deactivate_then_activate_round_trip() {
        let (state, _dir) = test_state();
        seed(&state, "d1", Role::Donor);

        let Json(deactivated) = deactivate_principal(Path("d1".to_string()), State(state.clone()))
            .await
            .unwrap();
        assert!(!deactivated.active);

        let Json(activated) = activate_principal(Path("d1".to_string()), State(state))
            .await
            .unwrap();
        assert!(activated.active);
    }

    #[tokio::test]
    async fn delete_unknown_principal_is_404() {
        let (state, _dir) = test_state();
        let err = delete_principal(Path("ghost".to_string()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
