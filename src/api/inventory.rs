// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Blood-unit inventory endpoints.
//!
//! Units are custodied by the lab or hospital that records them; the
//! custodian is always the authenticated caller, never taken from the body.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::BloodGroup,
    state::AppState,
    storage::{StoredUnit, UnitRepository, UnitStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct InventoryQuery {
    /// Restrict the listing to one blood group.
    pub group: Option<BloodGroup>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUnitRequest {
    pub blood_group: BloodGroup,
    pub volume_ml: u32,
    /// Donor the unit was collected from, when known.
    pub donor_id: Option<String>,
    pub collected_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUnitStatusRequest {
    pub status: UnitStatus,
}

/// Per-group availability counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupSummary {
    pub blood_group: BloodGroup,
    pub available: usize,
}

#[utoipa::path(
    get,
    path = "/v1/inventory",
    params(InventoryQuery),
    tag = "Inventory",
    security(("bearer" = [])),
    responses((status = 200, body = [StoredUnit]))
)]
pub async fn list_units(
    State(state): State<AppState>,
    Query(params): Query<InventoryQuery>,
) -> Result<Json<Vec<StoredUnit>>, ApiError> {
    let repo = UnitRepository::new(&state.storage);
    Ok(Json(repo.list(params.group)?))
}

#[utoipa::path(
    get,
    path = "/v1/inventory/summary",
    tag = "Inventory",
    security(("bearer" = [])),
    responses((status = 200, body = [GroupSummary]))
)]
pub async fn inventory_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let repo = UnitRepository::new(&state.storage);
    let summary = repo
        .available_by_group()?
        .into_iter()
        .map(|(blood_group, available)| GroupSummary {
            blood_group,
            available,
        })
        .collect();
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/v1/inventory",
    request_body = CreateUnitRequest,
    tag = "Inventory",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredUnit),
        (status = 400, description = "Invalid volume or timestamps")
    )
)]
pub async fn create_unit(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateUnitRequest>,
) -> Result<(StatusCode, Json<StoredUnit>), ApiError> {
    if request.volume_ml == 0 {
        return Err(ApiError::bad_request("volume must be positive"));
    }
    if request.expires_at <= request.collected_at {
        return Err(ApiError::bad_request("expiry must be after collection"));
    }

    let unit = StoredUnit {
        id: Uuid::new_v4().to_string(),
        blood_group: request.blood_group,
        volume_ml: request.volume_ml,
        status: UnitStatus::Available,
        custodian_id: principal.id,
        donor_id: request.donor_id,
        collected_at: request.collected_at,
        expires_at: request.expires_at,
    };
    UnitRepository::new(&state.storage).create(&unit)?;

    tracing::info!(unit_id = %unit.id, group = %unit.blood_group, "blood unit recorded");
    Ok((StatusCode::CREATED, Json(unit)))
}

#[utoipa::path(
    put,
    path = "/v1/inventory/{unit_id}/status",
    params(("unit_id" = String, Path, description = "Unit to update")),
    request_body = UpdateUnitStatusRequest,
    tag = "Inventory",
    security(("bearer" = [])),
    responses((status = 200, body = StoredUnit), (status = 404))
)]
pub async fn update_unit_status(
    Path(unit_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUnitStatusRequest>,
) -> Result<Json<StoredUnit>, ApiError> {
    let repo = UnitRepository::new(&state.storage);
    let mut unit = repo.get(&unit_id)?;
    unit.status = request.status;
    repo.update(&unit)?;
    Ok(Json(unit))
}

#[utoipa::path(
    delete,
    path = "/v1/inventory/{unit_id}",
    params(("unit_id" = String, Path, description = "Unit to delete")),
    tag = "Inventory",
    security(("bearer" = [])),
    responses((status = 204), (status = 404))
)]
pub async fn delete_unit(
    Path(unit_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    UnitRepository::new(&state.storage).delete(&unit_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role, TokenService};
    use crate::storage::{DocumentStorage, StoragePaths};
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize storage");
        let state = AppState::new(storage, TokenService::new("inventory-secret", 7));
        (state, temp_dir)
    }

    fn lab_principal() -> Principal {
        Principal {
            id: "lab-1".to_string(),
            name: "Central Lab".to_string(),
            email: "lab@example.com".to_string(),
            role: Role::BloodLab,
            active: true,
            blood_group: None,
            created_at: Utc::now(),
        }
    }

    fn unit_request(group: BloodGroup) -> CreateUnitRequest {
        let now = Utc::now();
        CreateUnitRequest {
            blood_group: group,
            volume_ml: 450,
            donor_id: None,
            collected_at: now,
            expires_at: now + Duration::days(42),
        }
    }

    #[tokio::test]
    async fn create_unit_assigns_caller_as_custodian() {
        let (state, _dir) = test_state();

        let (status, Json(unit)) = create_unit(
            State(state),
            Auth(lab_principal()),
            Json(unit_request(BloodGroup::APos)),
        )
        .await
        .expect("unit creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(unit.custodian_id, "lab-1");
        assert_eq!(unit.status, UnitStatus::Available);
    }

    #[tokio::test]
    async fn create_unit_rejects_inverted_timestamps() {
        let (state, _dir) = test_state();
        let mut request = unit_request(BloodGroup::APos);
        request.expires_at = request.collected_at - Duration::days(1);

        let err = create_unit(State(state), Auth(lab_principal()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_by_blood_group() {
        let (state, _dir) = test_state();
        for group in [BloodGroup::APos, BloodGroup::ONeg] {
            create_unit(
                State(state.clone()),
                Auth(lab_principal()),
                Json(unit_request(group)),
            )
            .await
            .unwrap();
        }

        let Json(all) = list_units(State(state.clone()), Query(InventoryQuery { group: None }))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let Json(o_neg) = list_units(
            State(state),
            Query(InventoryQuery {
                group: Some(BloodGroup::ONeg),
            }),
        )
        .await
        .unwrap();
        assert_eq!(o_neg.len(), 1);
        assert_eq!(o_neg[0].blood_group, BloodGroup::ONeg);
    }

    #[tokio::test]
    async fn summary_counts_available_only() {
        let (state, _dir) = test_state();
        let (_, Json(first)) = create_unit(
            State(state.clone()),
            Auth(lab_principal()),
            Json(unit_request(BloodGroup::BPos)),
        )
        .await
        .unwrap();
        create_unit(
            State(state.clone()),
            Auth(lab_principal()),
            Json(unit_request(BloodGroup::BPos)),
        )
        .await
        .unwrap();

        // Mark one unit as used; the summary must drop it.
        update_unit_status(
            Path(first.id),
            State(state.clone()),
            Json(UpdateUnitStatusRequest {
                status: UnitStatus::Used,
            }),
        )
        .await
        .unwrap();

        let Json(summary) = inventory_summary(State(state)).await.unwrap();
        let b_pos = summary
            .iter()
            .find(|entry| entry.blood_group == BloodGroup::BPos)
            .expect("B+ entry present");
        assert_eq!(b_pos.available, 1);
    }

    #[tokio::test]
    async fn delete_unit_removes_it() {
        let (state, _dir) = test_state();
        let (_, Json(unit)) = create_unit(
            State(state.clone()),
            Auth(lab_principal()),
            Json(unit_request(BloodGroup::APos)),
        )
        .await
        .unwrap();

        let status = delete_unit(Path(unit.id.clone()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = update_unit_status(
            Path(unit.id),
            State(state),
            Json(UpdateUnitStatusRequest {
                status: UnitStatus::Expired,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
