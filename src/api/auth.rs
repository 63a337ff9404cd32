// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Registration and login: the credential issuer.
//!
//! Both endpoints are public and return a freshly minted access token plus
//! the sanitized account. Login failures never reveal whether the email
//! exists or the account is deactivated.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::{Principal, Role},
    error::ApiError,
    models::BloodGroup,
    state::AppState,
    storage::{PrincipalRepository, StorageError, StoredPrincipal},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Donor blood group; ignored for other roles.
    pub blood_group: Option<BloodGroup>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    /// Bearer token valid for the configured window (7 days by default).
    pub token: String,
    pub principal: Principal,
}

fn issue_token(state: &AppState, principal: &StoredPrincipal) -> Result<String, ApiError> {
    state.tokens.issue(&principal.id, principal.role).map_err(|e| {
        tracing::error!(error = %e, principal_id = %principal.id, "token signing failed");
        ApiError::internal("failed to issue token")
    })
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, body = AuthResponse),
        (status = 400, description = "Admin self-registration or invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if request.role == Role::Admin {
        return Err(ApiError::bad_request(
            "admin accounts cannot be self-registered",
        ));
    }
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError::bad_request("name and email are required"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::bad_request(
            "password must be at least 8 characters",
        ));
    }

    let repo = PrincipalRepository::new(&state.storage);
    match repo.get_by_email(&request.email) {
        Ok(_) => return Err(ApiError::conflict("email already registered")),
        Err(StorageError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::internal("failed to process credentials")
    })?;

    let stored = StoredPrincipal {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        email: request.email,
        password_hash,
        role: request.role,
        active: true,
        blood_group: if request.role == Role::Donor {
            request.blood_group
        } else {
            None
        },
        created_at: Utc::now(),
    };
    repo.create(&stored)?;

    let token = issue_token(&state, &stored)?;
    tracing::info!(principal_id = %stored.id, role = %stored.role, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            principal: stored.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // One denial message for unknown email, wrong password, and deactivated
    // accounts: the response must not enumerate users.
    let denied = || ApiError::unauthorized("invalid email or password");

    let repo = PrincipalRepository::new(&state.storage);
    let stored = match repo.get_by_email(&request.email) {
        Ok(stored) => stored,
        Err(StorageError::NotFound(_)) => return Err(denied()),
        Err(e) => return Err(e.into()),
    };

    let matches = bcrypt::verify(&request.password, &stored.password_hash).map_err(|e| {
        tracing::error!(error = %e, "password verification failed");
        ApiError::internal("failed to process credentials")
    })?;
    if !matches || !stored.active {
        return Err(denied());
    }

    let token = issue_token(&state, &stored)?;
    tracing::info!(principal_id = %stored.id, "login succeeded");

    Ok(Json(AuthResponse {
        success: true,
        token,
        principal: stored.into(),
    }))
}
