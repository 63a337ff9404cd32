// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Self-service account endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    auth::{Auth, Principal},
    error::ApiError,
    models::BloodGroup,
    state::AppState,
    storage::PrincipalRepository,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub blood_group: Option<BloodGroup>,
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses((status = 200, body = Principal))
)]
pub async fn me(Auth(principal): Auth) -> Json<Principal> {
    Json(principal)
}

#[utoipa::path(
    put,
    path = "/v1/users/me",
    request_body = UpdateMeRequest,
    tag = "Users",
    security(("bearer" = [])),
    responses((status = 200, body = Principal))
)]
pub async fn update_me(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<UpdateMeRequest>,
) -> Result<Json<Principal>, ApiError> {
    let repo = PrincipalRepository::new(&state.storage);
    let mut stored = repo.get(&principal.id)?;

    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("name must not be empty"));
        }
        stored.name = name;
    }
    if let Some(group) = request.blood_group {
        stored.blood_group = Some(group);
    }
    repo.update(&stored)?;

    Ok(Json(stored.into()))
}
