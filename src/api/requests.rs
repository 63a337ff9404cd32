// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Blood-request endpoints.
//!
//! Donors and hospitals file requests; blood labs and admins work the pending
//! queue and decide them. Status transitions are enforced by the repository:
//! pending may become approved or rejected, approved may become fulfilled.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::BloodGroup,
    state::AppState,
    storage::{RequestRepository, RequestStatus, StoredBloodRequest},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestRequest {
    pub blood_group: BloodGroup,
    pub units: u32,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DecideRequestRequest {
    pub status: RequestStatus,
}

#[utoipa::path(
    post,
    path = "/v1/requests",
    request_body = CreateRequestRequest,
    tag = "Requests",
    security(("bearer" = [])),
    responses(
        (status = 201, body = StoredBloodRequest),
        (status = 400, description = "Zero units requested")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreateRequestRequest>,
) -> Result<(StatusCode, Json<StoredBloodRequest>), ApiError> {
    if request.units == 0 {
        return Err(ApiError::bad_request("at least one unit must be requested"));
    }

    let stored = StoredBloodRequest {
        id: Uuid::new_v4().to_string(),
        requester_id: principal.id,
        blood_group: request.blood_group,
        units: request.units,
        note: request.note,
        status: RequestStatus::Pending,
        created_at: Utc::now(),
        decided_at: None,
    };
    RequestRepository::new(&state.storage).create(&stored)?;

    tracing::info!(
        request_id = %stored.id,
        group = %stored.blood_group,
        units = stored.units,
        "blood request filed"
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    get,
    path = "/v1/requests/mine",
    tag = "Requests",
    security(("bearer" = [])),
    responses((status = 200, body = [StoredBloodRequest]))
)]
pub async fn my_requests(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<Vec<StoredBloodRequest>>, ApiError> {
    let repo = RequestRepository::new(&state.storage);
    Ok(Json(repo.list_by_requester(&principal.id)?))
}

#[utoipa::path(
    get,
    path = "/v1/requests",
    tag = "Requests",
    security(("bearer" = [])),
    responses((status = 200, body = [StoredBloodRequest]))
)]
pub async fn pending_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredBloodRequest>>, ApiError> {
    let repo = RequestRepository::new(&state.storage);
    Ok(Json(repo.list_pending()?))
}

#[utoipa::path(
    put,
    path = "/v1/requests/{request_id}/status",
    params(("request_id" = String, Path, description = "Request to decide")),
    request_body = DecideRequestRequest,
    tag = "Requests",
    security(("bearer" = [])),
    responses(
        (status = 200, body = StoredBloodRequest),
        (status = 404),
        (status = 409, description = "Transition not allowed from the current status")
    )
)]
pub async fn decide_request(
    Path(request_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<DecideRequestRequest>,
) -> Result<Json<StoredBloodRequest>, ApiError> {
    let repo = RequestRepository::new(&state.storage);
    let updated = repo.set_status(&request_id, request.status)?;

    tracing::info!(request_id = %updated.id, status = %updated.status, "blood request decided");
    Ok(Json(updated))
}
