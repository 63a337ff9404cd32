// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! BloodLink - Blood Donation Management Platform
//!
//! This crate provides the REST API for the BloodLink platform: donor,
//! hospital, blood-lab, and admin accounts, blood-unit inventory tracking,
//! donation-camp scheduling, and inter-party blood requests.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and role authorization (HS256 JWT)
//! - `storage` - Document storage (one JSON file per entity)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
