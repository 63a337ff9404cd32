// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! # Authentication Module
//!
//! This module is the gate every protected route depends on.
//!
//! ## Auth Flow
//!
//! 1. The credential issuer (`api/auth.rs`) mints an HS256 JWT at
//!    login/registration carrying `{ id, role, iat, exp }`.
//! 2. Clients send `Authorization: Bearer <token>`.
//! 3. The [`authenticate`] middleware:
//!    - parses the bearer header (case-insensitive scheme, single token)
//!    - verifies signature and expiry against the configured secret
//!    - resolves the subject id against the principal store
//!    - attaches the sanitized [`Principal`] to request extensions
//! 4. [`authorize`] (bound per route subtree) checks the principal's role
//!    against the allowed set. No role hierarchy: membership only.
//!
//! ## Security
//!
//! - The signing secret is loaded once at startup; the server refuses to
//!   start without it.
//! - Every request re-verifies and re-resolves from the store. There is no
//!   caching, so deactivating or deleting an account takes effect on that
//!   account's very next request.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod roles;
pub mod tokens;

pub use claims::{Claims, Principal};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{authenticate, authenticate_admin, authorize, AllowedRoles};
pub use roles::Role;
pub use tokens::TokenService;
