// Copyright 2026 Keygate Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Principal lookup collaborator.
//!
//! Persistence is owned elsewhere; this core only reads. The stored
//! `Principal` carries the credential hash, so a single lookup serves both
//! identity resolution and credential verification.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::errors::AuthError;
use crate::core::principal::Principal;

#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Look up a principal record by its unique identifier.
    ///
    /// `Ok(None)` means the principal does not exist; `Err(Store)` means the
    /// backing store itself failed.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Principal>, AuthError>;
}

/// In-memory store for tests and embedders without a database.
#[derive(Default)]
pub struct MemoryPrincipalStore {
    records: RwLock<HashMap<String, Principal>>,
}

impl MemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, principal: Principal) {
        let mut records = self.records.write().await;
        records.insert(principal.identifier.clone(), principal);
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Principal>, AuthError> {
        let records = self.records.read().await;
        Ok(records.get(identifier).cloned())
    }
}
