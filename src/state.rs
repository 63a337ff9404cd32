// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

use std::sync::Arc;

use crate::auth::TokenService;
use crate::storage::DocumentStorage;

/// Shared application state.
///
/// Both members are effectively immutable after startup: the token service
/// holds the signing secret loaded once from configuration, and the storage
/// handle only carries paths.
#[derive(Clone)]
pub struct AppState {
    pub storage: DocumentStorage,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(storage: DocumentStorage, tokens: TokenService) -> Self {
        Self {
            storage,
            tokens: Arc::new(tokens),
        }
    }
}
