// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! Route registration.
//!
//! Route protection is declared here and nowhere else: each subtree is
//! wrapped with the authentication middleware and an `authorize` layer
//! carrying the exact role set that subtree admits. The admin subtree uses
//! the admin gate, which checks the token's role claim before touching
//! storage. Handlers themselves only add ownership checks (camp organizer).

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{authenticate, authenticate_admin, authorize, AllowedRoles, Principal, Role},
    models::BloodGroup,
    state::AppState,
    storage::{CampStatus, RequestStatus, StoredBloodRequest, StoredCamp, StoredUnit, UnitStatus},
};

pub mod admin;
pub mod auth;
pub mod camps;
pub mod health;
pub mod inventory;
pub mod requests;
pub mod users;

const ANY_ROLE: &[Role] = &[Role::Donor, Role::Hospital, Role::BloodLab, Role::Admin];
const INVENTORY_READERS: &[Role] = &[Role::Hospital, Role::BloodLab, Role::Admin];
const INVENTORY_WRITERS: &[Role] = &[Role::BloodLab, Role::Admin];
const CAMP_ORGANIZERS: &[Role] = &[Role::Hospital, Role::BloodLab, Role::Admin];
const REQUESTERS: &[Role] = &[Role::Donor, Role::Hospital];
const REQUEST_DECIDERS: &[Role] = &[Role::BloodLab, Role::Admin];

pub fn router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/users/me", get(users::me).put(users::update_me))
        .route("/requests/mine", get(requests::my_requests))
        .route("/camps", get(camps::list_camps))
        .layer(from_fn_with_state(AllowedRoles(ANY_ROLE), authorize));

    let inventory_read = Router::new()
        .route("/inventory", get(inventory::list_units))
        .route("/inventory/summary", get(inventory::inventory_summary))
        .layer(from_fn_with_state(AllowedRoles(INVENTORY_READERS), authorize));

    let inventory_write = Router::new()
        .route("/inventory", post(inventory::create_unit))
        .route(
            "/inventory/{unit_id}/status",
            put(inventory::update_unit_status),
        )
        .layer(from_fn_with_state(AllowedRoles(INVENTORY_WRITERS), authorize));

    let inventory_admin = Router::new()
        .route("/inventory/{unit_id}", delete(inventory::delete_unit))
        .layer(from_fn_with_state(AllowedRoles(&[Role::Admin]), authorize));

    let camp_routes = Router::new()
        .route("/camps", post(camps::create_camp))
        .route(
            "/camps/{camp_id}",
            put(camps::update_camp).delete(camps::delete_camp),
        )
        .layer(from_fn_with_state(AllowedRoles(CAMP_ORGANIZERS), authorize));

    let request_routes = Router::new()
        .route("/requests", post(requests::create_request))
        .layer(from_fn_with_state(AllowedRoles(REQUESTERS), authorize));

    let request_queue = Router::new()
        .route("/requests", get(requests::pending_requests))
        .route(
            "/requests/{request_id}/status",
            put(requests::decide_request),
        )
        .layer(from_fn_with_state(AllowedRoles(REQUEST_DECIDERS), authorize));

    let protected = Router::new()
        .merge(user_routes)
        .merge(inventory_read)
        .merge(inventory_write)
        .merge(inventory_admin)
        .merge(camp_routes)
        .merge(request_routes)
        .merge(request_queue)
        .layer(from_fn_with_state(state.clone(), authenticate));

    let admin_routes = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route("/admin/principals", get(admin::list_principals))
        .route(
            "/admin/principals/{principal_id}",
            delete(admin::delete_principal),
        )
        .route(
            "/admin/principals/{principal_id}/deactivate",
            post(admin::deactivate_principal),
        )
        .route(
            "/admin/principals/{principal_id}/activate",
            post(admin::activate_principal),
        )
        .layer(from_fn_with_state(AllowedRoles(&[Role::Admin]), authorize))
        .layer(from_fn_with_state(state.clone(), authenticate_admin));

    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .merge(admin_routes)
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        users::me,
        users::update_me,
        inventory::list_units,
        inventory::inventory_summary,
        inventory::create_unit,
        inventory::update_unit_status,
        inventory::delete_unit,
        camps::list_camps,
        camps::create_camp,
        camps::update_camp,
        camps::delete_camp,
        requests::create_request,
        requests::my_requests,
        requests::pending_requests,
        requests::decide_request,
        admin::stats,
        admin::list_principals,
        admin::deactivate_principal,
        admin::activate_principal,
        admin::delete_principal,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Principal,
            Role,
            BloodGroup,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            users::UpdateMeRequest,
            StoredUnit,
            UnitStatus,
            inventory::CreateUnitRequest,
            inventory::UpdateUnitStatusRequest,
            inventory::GroupSummary,
            StoredCamp,
            CampStatus,
            camps::CreateCampRequest,
            camps::UpdateCampRequest,
            StoredBloodRequest,
            RequestStatus,
            requests::CreateRequestRequest,
            requests::DecideRequestRequest,
            admin::PlatformStats,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Self-service account management"),
        (name = "Inventory", description = "Blood-unit inventory"),
        (name = "Camps", description = "Donation camp scheduling"),
        (name = "Requests", description = "Blood requests and decisions"),
        (name = "Admin", description = "Platform administration"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::storage::{DocumentStorage, StoragePaths};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize storage");
        let state = AppState::new(storage, TokenService::new("router-test-secret", 7));
        (router(state), temp_dir)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn register(app: &Router, email: &str, role: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/v1/auth/register",
            None,
            Some(serde_json::json!({
                "name": "Test Account",
                "email": email,
                "password": "s3cure-password",
                "role": role,
                "blood_group": null,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _dir) = test_app();
        let (status, body) = call(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let (app, _dir) = test_app();
        let (status, body) = call(&app, Method::GET, "/v1/users/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "no token provided");
    }

    #[tokio::test]
    async fn register_login_then_me() {
        let (app, _dir) = test_app();
        register(&app, "dana@example.com", "donor").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/v1/auth/login",
            None,
            Some(serde_json::json!({
                "email": "dana@example.com",
                "password": "s3cure-password",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = call(&app, Method::GET, "/v1/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "dana@example.com");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn donor_cannot_read_inventory() {
        let (app, _dir) = test_app();
        let token = register(&app, "dana@example.com", "donor").await;

        let (status, body) = call(&app, Method::GET, "/v1/inventory", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "insufficient permissions");
    }

    #[tokio::test]
    async fn hospital_reads_but_cannot_write_inventory() {
        let (app, _dir) = test_app();
        let token = register(&app, "city@example.com", "hospital").await;

        let (status, _) = call(&app, Method::GET, "/v1/inventory", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &app,
            Method::POST,
            "/v1/inventory",
            Some(&token),
            Some(serde_json::json!({
                "blood_group": "O-",
                "volume_ml": 450,
                "donor_id": null,
                "collected_at": "2026-08-01T10:00:00Z",
                "expires_at": "2026-09-12T10:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "insufficient permissions");
    }

    #[tokio::test]
    async fn blood_lab_full_inventory_flow() {
        let (app, _dir) = test_app();
        let token = register(&app, "lab@example.com", "blood-lab").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/v1/inventory",
            Some(&token),
            Some(serde_json::json!({
                "blood_group": "AB+",
                "volume_ml": 450,
                "donor_id": null,
                "collected_at": "2026-08-01T10:00:00Z",
                "expires_at": "2026-09-12T10:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let unit_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/v1/inventory/{unit_id}/status"),
            Some(&token),
            Some(serde_json::json!({ "status": "reserved" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "reserved");

        // Unit deletion is admin-only.
        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/v1/inventory/{unit_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_routes_reject_non_admin_tokens() {
        let (app, _dir) = test_app();
        let token = register(&app, "lab@example.com", "blood-lab").await;

        let (status, body) = call(&app, Method::GET, "/v1/admin/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "insufficient permissions");
    }

    #[tokio::test]
    async fn request_lifecycle_across_roles() {
        let (app, _dir) = test_app();
        let hospital = register(&app, "city@example.com", "hospital").await;
        let lab = register(&app, "lab@example.com", "blood-lab").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/v1/requests",
            Some(&hospital),
            Some(serde_json::json!({
                "blood_group": "O-",
                "units": 2,
                "note": "urgent",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let request_id = body["id"].as_str().unwrap().to_string();

        // Labs see it in the pending queue; hospitals cannot read the queue.
        let (status, body) = call(&app, Method::GET, "/v1/requests", Some(&lab), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = call(&app, Method::GET, "/v1/requests", Some(&hospital), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/v1/requests/{request_id}/status"),
            Some(&lab),
            Some(serde_json::json!({ "status": "approved" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");

        let (status, body) = call(&app, Method::GET, "/v1/requests/mine", Some(&hospital), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["status"], "approved");
    }

    #[tokio::test]
    async fn unknown_role_string_fails_registration() {
        let (app, _dir) = test_app();
        let (status, _) = call(
            &app,
            Method::POST,
            "/v1/auth/register",
            None,
            Some(serde_json::json!({
                "name": "Eve",
                "email": "eve@example.com",
                "password": "s3cure-password",
                "role": "superuser",
                "blood_group": null,
            })),
        )
        .await;
        // Closed role enum: an unknown role is a deserialization failure.
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
