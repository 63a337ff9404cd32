// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Donation-camp endpoints.
//!
//! Any authenticated account may browse camps; creating is limited at the
//! route layer to hospitals, blood labs, and admins, and a camp may only be
//! modified or cancelled by its organizer or an admin.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::{Auth, Principal, Role},
    error::ApiError,
    state::AppState,
    storage::{CampRepository, CampStatus, StoredCamp},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CampsQuery {
    /// When true, only camps that have not yet ended (and are not cancelled).
    #[serde(default)]
    pub upcoming: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCampRequest {
    pub name: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCampRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<CampStatus>,
}

fn ensure_organizer_or_admin(camp: &StoredCamp, principal: &Principal) -> Result<(), ApiError> {
    if camp.organizer_id != principal.id && principal.role != Role::Admin {
        return Err(ApiError::forbidden("insufficient permissions"));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/v1/camps",
    params(CampsQuery),
    tag = "Camps",
    security(("bearer" = [])),
    responses((status = 200, body = [StoredCamp]))
)]
pub async fn list_camps(
    State(state): State<AppState>,
    Query(params): Query<CampsQuery>,
) -> Result<Json<Vec<StoredCamp>>, ApiError> {
    let repo = CampRepository::new(&state.storage);
    let camps = if params.upcoming {
        repo.list_upcoming()?
    } else {
        repo.list_all()?
    };
    Ok(Json(camps))
}

#[utoipa::path(
    post,
    path = "/v1/camps",
    request_body = CreateCampRequest,
    tag = "Camps",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredCamp),
        (status = 400, description = "Invalid schedule")
    )
)]
pub async fn create_camp(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateCampRequest>,
) -> Result<(StatusCode, Json<StoredCamp>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("camp name is required"));
    }
    if request.ends_at <= request.starts_at {
        return Err(ApiError::bad_request("camp must end after it starts"));
    }

    let camp = StoredCamp {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        organizer_id: principal.id,
        location: request.location,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
        status: CampStatus::Scheduled,
        created_at: Utc::now(),
    };
    CampRepository::new(&state.storage).create(&camp)?;

    tracing::info!(camp_id = %camp.id, organizer = %camp.organizer_id, "camp scheduled");
    Ok((StatusCode::CREATED, Json(camp)))
}

#[utoipa::path(
    put,
    path = "/v1/camps/{camp_id}",
    params(("camp_id" = String, Path, description = "Camp to update")),
    request_body = UpdateCampRequest,
    tag = "Camps",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StoredCamp),
        (status = 403, description = "Caller is neither organizer nor admin"),
        (status = 404)
    )
)]
pub async fn update_camp(
    Path(camp_id): Path<String>,
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<UpdateCampRequest>,
) -> Result<Json<StoredCamp>, ApiError> {
    let repo = CampRepository::new(&state.storage);
    let mut camp = repo.get(&camp_id)?;
    ensure_organizer_or_admin(&camp, &principal)?;

    if let Some(name) = request.name {
        camp.name = name;
    }
    if let Some(location) = request.location {
        camp.location = location;
    }
    if let Some(starts_at) = request.starts_at {
        camp.starts_at = starts_at;
    }
    if let Some(ends_at) = request.ends_at {
        camp.ends_at = ends_at;
    }
    if let Some(status) = request.status {
        camp.status = status;
    }
    if camp.ends_at <= camp.starts_at {
        return Err(ApiError::bad_request("camp must end after it starts"));
    }
    repo.update(&camp)?;

    Ok(Json(camp))
}

#[utoipa::path(
    delete,
    path = "/v1/camps/{camp_id}",
    params(("camp_id" = String, Path, description = "Camp to delete")),
    tag = "Camps",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 403, description = "Caller is neither organizer nor admin"),
        (status = 404)
    )
)]
pub async fn delete_camp(
    Path(camp_id): Path<String>,
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<StatusCode, ApiError> {
    let repo = CampRepository::new(&state.storage);
    let camp = repo.get(&camp_id)?;
    ensure_organizer_or_admin(&camp, &principal)?;

    repo.delete(&camp_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::storage::{DocumentStorage, StoragePaths};
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize storage");
        let state = AppState::new(storage, TokenService::new("camps-secret", 7));
        (state, temp_dir)
    }

    fn principal(id: &str, role: Role) -> Principal {
        Principal {
            id: id.to_string(),
            name: "Test".to_string(),
            email: format!("{id}@example.com"),
            role,
            active: true,
            blood_group: None,
            created_at: Utc::now(),
        }
    }

    fn camp_request(name: &str, start_offset_days: i64) -> CreateCampRequest {
        let start = Utc::now() + Duration::days(start_offset_days);
        CreateCampRequest {
            name: name.to_string(),
            location: "Community Center".to_string(),
            starts_at: start,
            ends_at: start + Duration::hours(8),
        }
    }

    #[tokio::test]
    async fn create_camp_records_organizer() {
        let (state, _dir) = test_state();

        let (status, Json(camp)) = create_camp(
            State(state),
            Auth(principal("hosp-1", Role::Hospital)),
            Json(camp_request("Spring Drive", 7)),
        )
        .await
        .expect("camp creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(camp.organizer_id, "hosp-1");
        assert_eq!(camp.status, CampStatus::Scheduled);
    }

    #[tokio::test]
    async fn upcoming_filter_drops_past_and_cancelled() {
        let (state, _dir) = test_state();
        let organizer = principal("hosp-1", Role::Hospital);

        create_camp(
            State(state.clone()),
            Auth(organizer.clone()),
            Json(camp_request("Future Drive", 7)),
        )
        .await
        .unwrap();
        create_camp(
            State(state.clone()),
            Auth(organizer.clone()),
            Json(camp_request("Past Drive", -7)),
        )
        .await
        .unwrap();
        let (_, Json(cancelled)) = create_camp(
            State(state.clone()),
            Auth(organizer.clone()),
            Json(camp_request("Cancelled Drive", 14)),
        )
        .await
        .unwrap();
        update_camp(
            Path(cancelled.id),
            State(state.clone()),
            Auth(organizer),
            Json(UpdateCampRequest {
                name: None,
                location: None,
                starts_at: None,
                ends_at: None,
                status: Some(CampStatus::Cancelled),
            }),
        )
        .await
        .unwrap();

        let Json(upcoming) = list_camps(State(state), Query(CampsQuery { upcoming: true }))
            .await
            .unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "Future Drive");
    }

    #[tokio::test]
    async fn non_organizer_cannot_update_camp() {
        let (state, _dir) = test_state();
        let (_, Json(camp)) = create_camp(
            State(state.clone()),
            Auth(principal("hosp-1", Role::Hospital)),
            Json(camp_request("Drive", 7)),
        )
        .await
        .unwrap();

        let err = update_camp(
            Path(camp.id),
            State(state),
            Auth(principal("hosp-2", Role::Hospital)),
            Json(UpdateCampRequest {
                name: Some("Hijacked".to_string()),
                location: None,
                starts_at: None,
                ends_at: None,
                status: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_may_delete_any_camp() {
        let (state, _dir) = test_state();
        let (_, Json(camp)) = create_camp(
            State(state.clone()),
            Auth(principal("hosp-1", Role::Hospital)),
            Json(camp_request("Drive", 7)),
        )
        .await
        .unwrap();

        let status = delete_camp(
            Path(camp.id),
            State(state),
            Auth(principal("boss", Role::Admin)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
